//! Per-frame snapshot of every named control.
//!
//! [`ControlSnapshot`] is an **owned**, read-only view of all control values at a
//! point in time (typically "this frame"). It is produced by
//! [`Controller::snapshot`](crate::controller::Controller::snapshot) or
//! [`Controller::tick`](crate::controller::Controller::tick) and is cheap to clone
//! for fan-out to systems that should not hold a borrow of the controller.
//!
//! Unknown names read as released / `0.0`; use the controller directly when a
//! missing control should be an error.
//!
//! ```no_run
//! use gameinput::Controller;
//!
//! fn update(input: &mut Controller) {
//!     let frame = input.tick();
//!     if frame.button("jump") {
//!         println!("jump! forward={:.2}", frame.axis("forward"));
//!     }
//! }
//! ```

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlSnapshot {
    pub buttons: HashMap<String, bool>,
    pub axes: HashMap<String, f32>,
}

impl ControlSnapshot {
    #[inline]
    pub fn button(&self, name: &str) -> bool {
        self.buttons.get(name).copied().unwrap_or(false)
    }

    #[inline]
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    /// Names of buttons that are pressed in this snapshot.
    pub fn pressed(&self) -> impl Iterator<Item = &str> {
        self.buttons
            .iter()
            .filter(|(_, &down)| down)
            .map(|(name, _)| name.as_str())
    }
}
