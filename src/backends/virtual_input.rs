use crate::device::InputSource;
use crate::event::InputEvent;
use crate::gamepad::GamepadState;

/// Scripted source: queue events with the helpers, the controller drains them on poll.
#[derive(Debug, Default)]
pub struct VirtualSource {
    id: String,
    name: String,
    events: Vec<InputEvent>,
}

impl VirtualSource {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    /// Queue a raw input event.
    pub fn feed(&mut self, event: InputEvent) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn press_key(&mut self, key: &str) -> &mut Self {
        self.feed(InputEvent::key_down(key))
    }

    pub fn release_key(&mut self, key: &str) -> &mut Self {
        self.feed(InputEvent::key_up(key))
    }

    pub fn press_pointer(&mut self, button: u32, x: f32, y: f32) -> &mut Self {
        self.feed(InputEvent::PointerDown { button, x, y })
    }

    pub fn release_pointer(&mut self, button: u32, x: f32, y: f32) -> &mut Self {
        self.feed(InputEvent::PointerUp { button, x, y })
    }

    pub fn move_pointer(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> &mut Self {
        self.feed(InputEvent::PointerMoved { x, y, dx, dy })
    }

    /// Connects a standard-layout pad in slot `index`.
    pub fn connect_gamepad(&mut self, index: usize) -> &mut Self {
        let pad = GamepadState::standard(index, format!("{} pad {}", self.name, index));
        self.feed(InputEvent::GamepadConnected(pad))
    }

    pub fn disconnect_gamepad(&mut self, index: usize) -> &mut Self {
        self.feed(InputEvent::GamepadDisconnected { index })
    }

    pub fn press_gamepad_button(&mut self, index: usize, button: usize) -> &mut Self {
        self.feed(InputEvent::GamepadButton {
            index,
            button,
            pressed: true,
        })
    }

    pub fn release_gamepad_button(&mut self, index: usize, button: usize) -> &mut Self {
        self.feed(InputEvent::GamepadButton {
            index,
            button,
            pressed: false,
        })
    }

    pub fn set_gamepad_axis(&mut self, index: usize, axis: usize, value: f32) -> &mut Self {
        self.feed(InputEvent::GamepadAxis { index, axis, value })
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for VirtualSource {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}
