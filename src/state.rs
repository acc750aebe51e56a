//! Keyboard and pointer state.
//!
//! [`DeviceState`] holds the last-known state reported by the host: which keys and
//! pointer buttons are down, where the pointer is, and how far it moved since the
//! frame started. Every read is total; unknown keys and buttons read as released.
//!
//! # Movement
//! Pointer deltas accumulate across events until someone takes them:
//! - [`DeviceState::peek_movement_x`] / [`DeviceState::peek_movement_y`] read the
//!   frame accumulator without touching it. Control resolution uses these, so any
//!   number of axes and buttons can observe the same motion within one frame.
//! - [`DeviceState::consume_movement_x`] / [`DeviceState::consume_movement_y`]
//!   return the accumulated delta and zero that axis. A second consume with no
//!   movement in between returns `0.0`.
//! - [`DeviceState::reset_movement`] zeroes the frame accumulator; the controller
//!   calls it once per tick from [`Controller::end_frame`](crate::controller::Controller::end_frame).
//!
//! Code that wants its own stream of deltas independent of the frame cadence can
//! register a movement consumer. Each consumer owns a private accumulator, so
//! consuming through one id never starves another. Ids are bound to the state
//! that issued them.
//!
//! Non-finite deltas are stored as `0.0`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Handle to a private movement accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumerId {
    owner: u64,
    key: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Movement {
    dx: f32,
    dy: f32,
}

impl Movement {
    fn add(&mut self, dx: f32, dy: f32) {
        self.dx += dx;
        self.dy += dy;
    }

    fn take(&mut self) -> (f32, f32) {
        let out = (self.dx, self.dy);
        *self = Movement::default();
        out
    }
}

/// Keyboard and pointer state as last reported by the host.
///
/// A clone keeps the consumers of the original, so ids issued before the clone
/// work on both copies independently.
#[derive(Debug, Clone)]
pub struct DeviceState {
    keyboard: HashMap<String, bool>,
    pointer_buttons: HashMap<u32, bool>,
    pointer: (f32, f32),
    movement: Movement,
    owner: u64,
    next_consumer: u64,
    consumers: Vec<(u64, Movement)>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            keyboard: HashMap::new(),
            pointer_buttons: HashMap::new(),
            pointer: (0.0, 0.0),
            movement: Movement::default(),
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            next_consumer: 0,
            consumers: Vec::new(),
        }
    }
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` iff `key` is currently held. Unknown keys read as released.
    pub fn key(&self, key: &str) -> bool {
        self.keyboard.get(key).copied().unwrap_or(false)
    }

    pub fn set_key(&mut self, key: impl Into<String>, pressed: bool) {
        self.keyboard.insert(key.into(), pressed);
    }

    /// `true` iff pointer button `button` is currently held. Touch is button `0`.
    pub fn pointer_button(&self, button: u32) -> bool {
        self.pointer_buttons.get(&button).copied().unwrap_or(false)
    }

    pub fn set_pointer_button(&mut self, button: u32, pressed: bool) {
        self.pointer_buttons.insert(button, pressed);
    }

    /// Last reported pointer position in host units.
    pub fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Adds a relative motion to the frame accumulator and to every registered consumer.
    pub fn add_pointer_movement(&mut self, dx: f32, dy: f32) {
        let finite = |d: f32| if d.is_finite() { d } else { 0.0 };
        let (dx, dy) = (finite(dx), finite(dy));
        self.movement.add(dx, dy);
        for (_, consumer) in &mut self.consumers {
            consumer.add(dx, dy);
        }
    }

    /// Accumulated X delta for this frame, left in place.
    pub fn peek_movement_x(&self) -> f32 {
        self.movement.dx
    }

    /// Accumulated Y delta for this frame, left in place.
    pub fn peek_movement_y(&self) -> f32 {
        self.movement.dy
    }

    /// Returns the accumulated X delta and resets it to zero.
    pub fn consume_movement_x(&mut self) -> f32 {
        std::mem::take(&mut self.movement.dx)
    }

    /// Returns the accumulated Y delta and resets it to zero.
    pub fn consume_movement_y(&mut self) -> f32 {
        std::mem::take(&mut self.movement.dy)
    }

    /// Zeroes the frame accumulator. Registered consumers are left alone.
    pub fn reset_movement(&mut self) {
        self.movement = Movement::default();
    }

    /// Creates a private accumulator that sees every future movement event.
    pub fn register_movement_consumer(&mut self) -> ConsumerId {
        let key = self.next_consumer;
        self.next_consumer += 1;
        self.consumers.push((key, Movement::default()));
        ConsumerId {
            owner: self.owner,
            key,
        }
    }

    /// Drops the accumulator behind `id`. Returns `false` for unknown or foreign ids.
    pub fn unregister_movement_consumer(&mut self, id: ConsumerId) -> bool {
        if id.owner != self.owner {
            return false;
        }
        let before = self.consumers.len();
        self.consumers.retain(|(key, _)| *key != id.key);
        self.consumers.len() != before
    }

    /// Returns `(dx, dy)` collected for `id` since its last consume and resets it.
    ///
    /// Ids issued by a different `DeviceState`, or already unregistered, read as
    /// `(0.0, 0.0)`.
    pub fn consume_movement(&mut self, id: ConsumerId) -> (f32, f32) {
        if id.owner != self.owner {
            return (0.0, 0.0);
        }
        self.consumers
            .iter_mut()
            .find(|(key, _)| *key == id.key)
            .map(|(_, movement)| movement.take())
            .unwrap_or((0.0, 0.0))
    }

    /// Releases every key and pointer button, e.g. after the window lost focus.
    pub fn release_all(&mut self) {
        self.keyboard.values_mut().for_each(|v| *v = false);
        self.pointer_buttons.values_mut().for_each(|v| *v = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_inputs_read_released() {
        let state = DeviceState::new();
        assert!(!state.key("w"));
        assert!(!state.pointer_button(0));
        assert!(!state.pointer_button(7));
    }

    #[test]
    fn key_release_is_tracked() {
        let mut state = DeviceState::new();
        state.set_key("w", true);
        assert!(state.key("w"));
        state.set_key("w", false);
        assert!(!state.key("w"));
    }

    #[test]
    fn consume_is_destructive() {
        let mut state = DeviceState::new();
        state.add_pointer_movement(3.0, -2.0);
        state.add_pointer_movement(1.5, 0.0);

        assert_eq!(state.consume_movement_x(), 4.5);
        assert_eq!(state.consume_movement_x(), 0.0);
        // Y is independent of X.
        assert_eq!(state.consume_movement_y(), -2.0);
        assert_eq!(state.consume_movement_y(), 0.0);
    }

    #[test]
    fn peek_leaves_accumulator_alone() {
        let mut state = DeviceState::new();
        state.add_pointer_movement(-3.0, 2.0);
        assert_eq!(state.peek_movement_x(), -3.0);
        assert_eq!(state.peek_movement_x(), -3.0);
        assert_eq!(state.peek_movement_y(), 2.0);

        state.reset_movement();
        assert_eq!(state.peek_movement_x(), 0.0);
        assert_eq!(state.peek_movement_y(), 0.0);
    }

    #[test]
    fn consumers_are_partitioned() {
        let mut state = DeviceState::new();
        let a = state.register_movement_consumer();
        let b = state.register_movement_consumer();

        state.add_pointer_movement(1.0, 1.0);
        assert_eq!(state.consume_movement(a), (1.0, 1.0));
        assert_eq!(state.consume_movement(a), (0.0, 0.0));

        state.add_pointer_movement(2.0, 0.0);
        assert_eq!(state.consume_movement(b), (3.0, 1.0));
        assert_eq!(state.consume_movement(a), (2.0, 0.0));

        // The frame accumulator is untouched by consumer reads.
        assert_eq!(state.peek_movement_x(), 3.0);
    }

    #[test]
    fn consumer_ids_do_not_cross_states() {
        let mut a = DeviceState::new();
        let mut b = DeviceState::new();
        let id = a.register_movement_consumer();
        b.register_movement_consumer();

        b.add_pointer_movement(5.0, 1.0);
        assert_eq!(b.consume_movement(id), (0.0, 0.0));
        assert!(!b.unregister_movement_consumer(id));

        a.add_pointer_movement(1.0, 2.0);
        assert_eq!(a.consume_movement(id), (1.0, 2.0));
    }

    #[test]
    fn unregistered_consumer_stops_collecting() {
        let mut state = DeviceState::new();
        let a = state.register_movement_consumer();
        let b = state.register_movement_consumer();

        assert!(state.unregister_movement_consumer(a));
        assert!(!state.unregister_movement_consumer(a));

        state.add_pointer_movement(4.0, 0.0);
        assert_eq!(state.consume_movement(a), (0.0, 0.0));
        assert_eq!(state.consume_movement(b), (4.0, 0.0));

        // Fresh ids never alias a removed one.
        let c = state.register_movement_consumer();
        assert_ne!(a, c);
    }

    #[test]
    fn non_finite_deltas_are_dropped() {
        let mut state = DeviceState::new();
        let id = state.register_movement_consumer();
        state.add_pointer_movement(f32::NAN, f32::INFINITY);
        state.add_pointer_movement(2.0, f32::NEG_INFINITY);

        assert_eq!(state.peek_movement_x(), 2.0);
        assert_eq!(state.peek_movement_y(), 0.0);
        assert_eq!(state.consume_movement(id), (2.0, 0.0));
    }

    #[test]
    fn release_all_clears_held_inputs() {
        let mut state = DeviceState::new();
        state.set_key("a", true);
        state.set_pointer_button(2, true);
        state.release_all();
        assert!(!state.key("a"));
        assert!(!state.pointer_button(2));
    }
}
