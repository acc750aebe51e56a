//! The controller: device state, gamepads and named controls in one value.
//!
//! A [`Controller`] is an ordinary owned value. Create one per independent input
//! context (one per split-screen player, one per test) and pass it wherever
//! controls are resolved.
//!
//! # Frame loop
//! ```
//! use gameinput::{Controller, Influence, InputEvent};
//!
//! let mut input = Controller::new();
//! input.get_or_create_axis("forward")
//!     .add_influence(Influence::new().key("w").with_value(1.0));
//! input.get_or_create_axis("forward")
//!     .add_influence(Influence::new().key("s").with_value(-1.0));
//!
//! // Host event callbacks:
//! input.apply(&InputEvent::key_down("w"));
//!
//! // Once per tick:
//! assert_eq!(input.axis_value("forward").unwrap(), 1.0);
//! input.end_frame();
//! ```
//!
//! Resolution only reads state. Pointer deltas stay visible to every control for
//! the whole frame and are cleared by [`Controller::end_frame`] (or
//! [`Controller::tick`], which polls sources, snapshots, then ends the frame).

use crate::axis::Axis;
use crate::button::Button;
use crate::config::InputConfig;
use crate::device::InputSource;
use crate::error::{ControlKind, InputError, Result};
use crate::event::InputEvent;
use crate::gamepad::{GamepadRegistry, GamepadState};
use crate::influence::{PointerAxis, TouchRect};
use crate::snapshot::ControlSnapshot;
use crate::state::DeviceState;
use crate::viewport::Viewport;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Device state, connected gamepads and the named axes and buttons read from them.
pub struct Controller {
    state: DeviceState,
    gamepads: GamepadRegistry,
    buttons: BTreeMap<String, Button>,
    axes: BTreeMap<String, Axis>,
    sources: Vec<Box<dyn InputSource>>,
    viewport: Option<Viewport>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            state: DeviceState::new(),
            gamepads: GamepadRegistry::new(),
            buttons: BTreeMap::new(),
            axes: BTreeMap::new(),
            sources: Vec::new(),
            viewport: None,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    pub fn gamepads(&self) -> &GamepadRegistry {
        &self.gamepads
    }

    pub fn gamepads_mut(&mut self) -> &mut GamepadRegistry {
        &mut self.gamepads
    }

    // ---- device hooks -------------------------------------------------------

    pub fn set_key_state(&mut self, key: impl Into<String>, pressed: bool) {
        self.state.set_key(key, pressed);
    }

    pub fn set_pointer_button(&mut self, button: u32, pressed: bool) {
        self.state.set_pointer_button(button, pressed);
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.state.set_pointer_position(x, y);
    }

    pub fn add_pointer_movement(&mut self, dx: f32, dy: f32) {
        self.state.add_pointer_movement(dx, dy);
    }

    /// Returns `false` when the pad's slot is out of range, see [`crate::gamepad::MAX_GAMEPADS`].
    pub fn register_gamepad(&mut self, pad: GamepadState) -> bool {
        self.gamepads.register(pad)
    }

    pub fn unregister_gamepad(&mut self, index: usize) {
        self.gamepads.unregister(index);
    }

    pub fn set_gamepad_button(&mut self, index: usize, button: usize, pressed: bool) -> bool {
        self.gamepads.set_button(index, button, pressed)
    }

    pub fn set_gamepad_axis(&mut self, index: usize, axis: usize, value: f32) -> bool {
        self.gamepads.set_axis(index, axis, value)
    }

    /// Routes one host event to the matching hook.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key } => self.state.set_key(key.as_str(), true),
            InputEvent::KeyUp { key } => self.state.set_key(key.as_str(), false),
            InputEvent::PointerDown { button, x, y } => {
                self.state.set_pointer_position(*x, *y);
                self.state.set_pointer_button(*button, true);
            }
            InputEvent::PointerUp { button, x, y } => {
                self.state.set_pointer_position(*x, *y);
                self.state.set_pointer_button(*button, false);
            }
            InputEvent::PointerMoved { x, y, dx, dy } => {
                self.state.set_pointer_position(*x, *y);
                self.state.add_pointer_movement(*dx, *dy);
            }
            InputEvent::TouchStart { x, y } | InputEvent::TouchMoved { x, y } => {
                self.state.set_pointer_position(*x, *y);
                self.state.set_pointer_button(0, true);
            }
            InputEvent::TouchEnd { x, y } | InputEvent::TouchCancel { x, y } => {
                self.state.set_pointer_position(*x, *y);
                self.state.set_pointer_button(0, false);
            }
            InputEvent::GamepadConnected(pad) => {
                self.register_gamepad(pad.clone());
            }
            InputEvent::GamepadDisconnected { index } => self.unregister_gamepad(*index),
            InputEvent::GamepadButton {
                index,
                button,
                pressed,
            } => {
                if !self.gamepads.set_button(*index, *button, *pressed) {
                    debug!(slot = index, button, "gamepad button event ignored");
                }
            }
            InputEvent::GamepadAxis { index, axis, value } => {
                if !self.gamepads.set_axis(*index, *axis, *value) {
                    debug!(slot = index, axis, "gamepad axis event ignored");
                }
            }
        }
    }

    /// Adds a source drained by [`Controller::poll_sources`].
    pub fn add_source<S: InputSource + 'static>(&mut self, source: S) {
        debug!(id = source.id(), name = source.name(), "input source added");
        self.sources.push(Box::new(source));
    }

    /// Polls every source and applies its events in order. Returns how many were applied.
    pub fn poll_sources(&mut self) -> usize {
        let mut events = Vec::new();
        for source in self.sources.iter_mut() {
            events.extend(source.poll());
        }
        for event in &events {
            self.apply(event);
        }
        events.len()
    }

    // ---- movement -----------------------------------------------------------

    /// This frame's accumulated delta on `axis`, left in place.
    pub fn peek_movement(&self, axis: PointerAxis) -> f32 {
        match axis {
            PointerAxis::X => self.state.peek_movement_x(),
            PointerAxis::Y => self.state.peek_movement_y(),
        }
    }

    /// Takes the accumulated X delta. Controls resolved afterwards in the same frame see `0.0`.
    pub fn consume_movement_x(&mut self) -> f32 {
        self.state.consume_movement_x()
    }

    /// Takes the accumulated Y delta. Controls resolved afterwards in the same frame see `0.0`.
    pub fn consume_movement_y(&mut self) -> f32 {
        self.state.consume_movement_y()
    }

    /// Clears the frame's pointer deltas. Call once after all controls were read.
    pub fn end_frame(&mut self) {
        self.state.reset_movement();
    }

    // ---- axes ---------------------------------------------------------------

    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.contains_key(name)
    }

    /// Registers a new empty axis; fails if `name` is taken.
    pub fn create_axis(&mut self, name: &str) -> Result<&mut Axis> {
        if self.axes.contains_key(name) {
            return Err(InputError::already_exists(ControlKind::Axis, name));
        }
        debug!(name, "axis created");
        Ok(self.axes.entry(name.to_string()).or_default())
    }

    pub fn get_or_create_axis(&mut self, name: &str) -> &mut Axis {
        if !self.axes.contains_key(name) {
            debug!(name, "axis created");
        }
        self.axes.entry(name.to_string()).or_default()
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.get(name)
    }

    pub fn axis_mut(&mut self, name: &str) -> Option<&mut Axis> {
        self.axes.get_mut(name)
    }

    /// Resolves the named axis against the current state.
    pub fn axis_value(&self, name: &str) -> Result<f32> {
        let axis = self
            .axes
            .get(name)
            .ok_or_else(|| InputError::not_found(ControlKind::Axis, name))?;
        Ok(axis.test(self))
    }

    /// Removes the named axis. Absent names are ignored.
    pub fn delete_axis(&mut self, name: &str) -> Option<Axis> {
        let removed = self.axes.remove(name);
        if removed.is_some() {
            debug!(name, "axis deleted");
        }
        removed
    }

    /// Axis names in sorted order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    // ---- buttons ------------------------------------------------------------

    pub fn has_button(&self, name: &str) -> bool {
        self.buttons.contains_key(name)
    }

    /// Registers a new empty button; fails if `name` is taken.
    pub fn create_button(&mut self, name: &str) -> Result<&mut Button> {
        if self.buttons.contains_key(name) {
            return Err(InputError::already_exists(ControlKind::Button, name));
        }
        debug!(name, "button created");
        Ok(self.buttons.entry(name.to_string()).or_default())
    }

    pub fn get_or_create_button(&mut self, name: &str) -> &mut Button {
        if !self.buttons.contains_key(name) {
            debug!(name, "button created");
        }
        self.buttons.entry(name.to_string()).or_default()
    }

    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.get(name)
    }

    pub fn button_mut(&mut self, name: &str) -> Option<&mut Button> {
        self.buttons.get_mut(name)
    }

    /// Resolves the named button against the current state.
    pub fn button_value(&self, name: &str) -> Result<bool> {
        let button = self
            .buttons
            .get(name)
            .ok_or_else(|| InputError::not_found(ControlKind::Button, name))?;
        Ok(button.test(self))
    }

    /// Removes the named button. Absent names are ignored.
    pub fn delete_button(&mut self, name: &str) -> Option<Button> {
        let removed = self.buttons.remove(name);
        if removed.is_some() {
            debug!(name, "button deleted");
        }
        removed
    }

    /// Button names in sorted order.
    pub fn button_names(&self) -> impl Iterator<Item = &str> {
        self.buttons.keys().map(String::as_str)
    }

    // ---- layouts ------------------------------------------------------------

    /// Merges a layout into the existing controls.
    ///
    /// Each entry get-or-creates its control and appends its influences after any
    /// already attached; loading the same layout twice attaches everything twice.
    /// The whole layout is validated first, so a bad entry leaves the controller
    /// untouched.
    pub fn load_config(&mut self, config: &InputConfig) -> Result<()> {
        self.install(config, false)
    }

    /// Like [`Controller::load_config`], but every control the layout lists loses
    /// its current influences first. Controls the layout does not mention are kept,
    /// and repeated entries for one control within the layout still accumulate.
    pub fn load_config_replacing(&mut self, config: &InputConfig) -> Result<()> {
        self.install(config, true)
    }

    fn install(&mut self, config: &InputConfig, replace: bool) -> Result<()> {
        let layout = config.compile()?;
        let (button_count, axis_count) = (layout.buttons.len(), layout.axes.len());
        let mut cleared_buttons = HashSet::new();
        let mut cleared_axes = HashSet::new();

        for (id, influences) in layout.buttons {
            if influences.is_empty() {
                warn!(button = %id, "layout entry declares no influences");
            }
            let button = self.get_or_create_button(&id);
            if replace && cleared_buttons.insert(id.clone()) {
                button.clear();
            }
            for inf in influences {
                if inf.is_empty() {
                    debug!(button = %id, "influence has no sources and will never activate");
                }
                button.add_influence(inf);
            }
        }

        for (id, influences) in layout.axes {
            if influences.is_empty() {
                warn!(axis = %id, "layout entry declares no influences");
            }
            let axis = self.get_or_create_axis(&id);
            if replace && cleared_axes.insert(id.clone()) {
                axis.clear();
            }
            for inf in influences {
                if inf.sources().is_empty() {
                    debug!(axis = %id, "influence has no sources and will never activate");
                }
                axis.add_influence(inf);
            }
        }

        info!(
            layout = layout.name.as_deref().unwrap_or("<unnamed>"),
            buttons = button_count,
            axes = axis_count,
            replace,
            "installed input layout"
        );
        Ok(())
    }

    /// Reads a JSON or TOML layout file and merges it, see [`Controller::load_config`].
    pub fn load_config_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let config = InputConfig::from_path(path)?;
        self.load_config(&config)
    }

    /// Exports every control and its influences as a layout.
    pub fn to_config(&self, name: Option<&str>) -> InputConfig {
        use crate::config::{AxisConfig, ButtonConfig};

        InputConfig {
            name: name.map(str::to_string),
            buttons: self
                .buttons
                .iter()
                .map(|(id, button)| ButtonConfig {
                    id: id.clone(),
                    influences: Some(button.influences().map(|(_, inf)| inf.into()).collect()),
                })
                .collect(),
            axes: self
                .axes
                .iter()
                .map(|(id, axis)| AxisConfig {
                    id: id.clone(),
                    influences: Some(axis.influences().map(|(_, inf)| inf.into()).collect()),
                })
                .collect(),
        }
    }

    // ---- frames -------------------------------------------------------------

    /// Resolves every named control once.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            buttons: self
                .buttons
                .iter()
                .map(|(name, b)| (name.clone(), b.test(self)))
                .collect(),
            axes: self
                .axes
                .iter()
                .map(|(name, a)| (name.clone(), a.test(self)))
                .collect(),
        }
    }

    /// Polls sources, snapshots every control, then ends the frame.
    pub fn tick(&mut self) -> ControlSnapshot {
        self.poll_sources();
        let snap = self.snapshot();
        self.end_frame();
        snap
    }

    // ---- pointer mapping ----------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn pointer_position(&self) -> (f32, f32) {
        self.state.pointer_position()
    }

    /// Pointer position mapped to `[0, 1]`; `None` without a viewport.
    pub fn pointer_normalized(&self) -> Option<(f32, f32)> {
        let (x, y) = self.state.pointer_position();
        self.viewport.map(|vp| vp.normalized(x, y))
    }

    /// Pointer offset from the viewport middle, zoom applied; `None` without a viewport.
    pub fn pointer_centered(&self) -> Option<(f32, f32)> {
        let (x, y) = self.state.pointer_position();
        self.viewport.map(|vp| vp.centered(x, y))
    }

    /// `true` while pointer button `0` is held inside any of `rects`.
    pub(crate) fn primary_pointer_in(&self, rects: &[TouchRect]) -> bool {
        if rects.is_empty() || !self.state.pointer_button(0) {
            return false;
        }
        self.pointer_normalized()
            .is_some_and(|(nx, ny)| rects.iter().any(|r| r.contains(nx, ny)))
    }

    /// Pointer in world coordinates; `None` without a viewport.
    pub fn pointer_world(&self) -> Option<(f32, f32)> {
        let (x, y) = self.state.pointer_position();
        self.viewport.map(|vp| vp.world(x, y))
    }
}
