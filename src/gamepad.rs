//! Connected gamepads and "which gamepad" resolution.
//!
//! The registry is slot based, mirroring how hosts (browsers, XInput, gilrs)
//! number their pads: a gamepad occupies slot [`GamepadState::index`] until it
//! disconnects, and other slots keep their numbers when one empties.
//!
//! Queries take an optional slot:
//! - `Some(i)` reads the pad in slot `i`, or nothing if that slot is empty.
//! - `None` reads the first connected pad in slot order.
//!
//! Unresolvable queries never fail; buttons read as released and axes as `0.0`.
//!
//! Slots and channels are bounded by [`MAX_GAMEPADS`] and [`MAX_CHANNELS`]. Writes
//! past either bound come from misbehaving hosts and are dropped with a warning.

use tracing::{debug, warn};

/// Number of buttons in the W3C "standard" gamepad layout.
pub const STANDARD_BUTTONS: usize = 17;
/// Number of axes in the W3C "standard" gamepad layout.
pub const STANDARD_AXES: usize = 4;
/// Highest slot count the registry accepts.
pub const MAX_GAMEPADS: usize = 16;
/// Highest button or axis count a single pad accepts.
pub const MAX_CHANNELS: usize = 64;

/// Point-in-time state of one gamepad.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GamepadState {
    /// Slot the host assigned to this pad.
    pub index: usize,
    /// Host-provided identifier, e.g. `"Xbox Wireless Controller (STANDARD GAMEPAD)"`.
    pub id: String,
    /// Hosts may keep a stale handle around after unplugging; such pads never resolve.
    pub connected: bool,
    buttons: Vec<bool>,
    axes: Vec<f32>,
}

impl GamepadState {
    /// A connected pad with no buttons or axes yet. They grow on first write.
    pub fn new(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
            connected: true,
            buttons: Vec::new(),
            axes: Vec::new(),
        }
    }

    /// A connected pad with the standard 17 buttons and 4 axes, all at rest.
    pub fn standard(index: usize, id: impl Into<String>) -> Self {
        Self::new(index, id)
            .with_buttons(STANDARD_BUTTONS)
            .with_axes(STANDARD_AXES)
    }

    /// Sizes the button array, capped at [`MAX_CHANNELS`].
    pub fn with_buttons(mut self, count: usize) -> Self {
        self.buttons = vec![false; count.min(MAX_CHANNELS)];
        self
    }

    /// Sizes the axis array, capped at [`MAX_CHANNELS`].
    pub fn with_axes(mut self, count: usize) -> Self {
        self.axes = vec![0.0; count.min(MAX_CHANNELS)];
        self
    }

    /// Pressed state of `button`; `false` when out of range.
    pub fn button(&self, button: usize) -> bool {
        self.buttons.get(button).copied().unwrap_or(false)
    }

    /// Value of `axis` in `[-1, 1]`; `0.0` when out of range.
    pub fn axis(&self, axis: usize) -> f32 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }

    /// Stores a button state, growing the array as needed.
    ///
    /// Returns `false` and leaves the pad untouched when `button` is not below
    /// [`MAX_CHANNELS`].
    pub fn set_button(&mut self, button: usize, pressed: bool) -> bool {
        if button >= MAX_CHANNELS {
            warn!(slot = self.index, button, "gamepad button index out of range");
            return false;
        }
        if button >= self.buttons.len() {
            self.buttons.resize(button + 1, false);
        }
        self.buttons[button] = pressed;
        true
    }

    /// Stores `value` clamped to `[-1, 1]`. NaN is stored as `0.0`.
    ///
    /// Returns `false` when `axis` is not below [`MAX_CHANNELS`].
    pub fn set_axis(&mut self, axis: usize, value: f32) -> bool {
        if axis >= MAX_CHANNELS {
            warn!(slot = self.index, axis, "gamepad axis index out of range");
            return false;
        }
        if axis >= self.axes.len() {
            self.axes.resize(axis + 1, 0.0);
        }
        self.axes[axis] = if value.is_nan() {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        };
        true
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }
}

/// Slot-indexed collection of gamepads.
#[derive(Debug, Default, Clone)]
pub struct GamepadRegistry {
    slots: Vec<Option<GamepadState>>,
}

impl GamepadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `pad` in slot `pad.index`, replacing whatever occupied it.
    ///
    /// Returns `false` and drops the pad when its slot is not below [`MAX_GAMEPADS`].
    pub fn register(&mut self, pad: GamepadState) -> bool {
        let index = pad.index;
        if index >= MAX_GAMEPADS {
            warn!(slot = index, id = %pad.id, "gamepad slot out of range");
            return false;
        }
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        debug!(slot = index, id = %pad.id, "gamepad connected");
        self.slots[index] = Some(pad);
        true
    }

    /// Empties slot `index`. Disconnecting an empty slot is logged and ignored.
    pub fn unregister(&mut self, index: usize) -> Option<GamepadState> {
        let removed = self.slots.get_mut(index).and_then(Option::take);
        match &removed {
            Some(pad) => debug!(slot = index, id = %pad.id, "gamepad disconnected"),
            None => warn!(
                slot = index,
                "cannot remove disconnected gamepad that was never added"
            ),
        }
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        removed
    }

    /// Resolves which pad a query refers to.
    ///
    /// `Some(i)` selects slot `i`; `None` selects the first connected pad.
    pub fn resolve(&self, index: Option<usize>) -> Option<&GamepadState> {
        match index {
            Some(i) => self
                .slots
                .get(i)
                .and_then(Option::as_ref)
                .filter(|pad| pad.connected),
            None => self.connected().next(),
        }
    }

    /// Pressed state of `button` on the resolved pad; `false` if nothing resolves.
    pub fn button(&self, button: usize, index: Option<usize>) -> bool {
        self.resolve(index)
            .map(|pad| pad.button(button))
            .unwrap_or(false)
    }

    /// Value of `axis` on the resolved pad; `0.0` if nothing resolves.
    pub fn axis(&self, axis: usize, index: Option<usize>) -> f32 {
        self.resolve(index).map(|pad| pad.axis(axis)).unwrap_or(0.0)
    }

    /// Updates a button on the pad in slot `index`.
    ///
    /// Returns `false` if the slot is empty or `button` is out of range.
    pub fn set_button(&mut self, index: usize, button: usize, pressed: bool) -> bool {
        self.gamepad_mut(index)
            .is_some_and(|pad| pad.set_button(button, pressed))
    }

    /// Updates an axis on the pad in slot `index`.
    ///
    /// Returns `false` if the slot is empty or `axis` is out of range.
    pub fn set_axis(&mut self, index: usize, axis: usize, value: f32) -> bool {
        self.gamepad_mut(index)
            .is_some_and(|pad| pad.set_axis(axis, value))
    }

    /// The pad registered in slot `index`, connected or not.
    pub fn gamepad(&self, index: usize) -> Option<&GamepadState> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn gamepad_mut(&mut self, index: usize) -> Option<&mut GamepadState> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Connected pads in slot order.
    pub fn connected(&self) -> impl Iterator<Item = &GamepadState> {
        self.slots.iter().flatten().filter(|pad| pad.connected)
    }

    pub fn has_gamepads(&self) -> bool {
        self.connected().next().is_some()
    }
}
