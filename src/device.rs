//! Pluggable event producers.

use crate::event::InputEvent;

/// Something the controller can pull [`InputEvent`]s from once per tick.
///
/// Window-loop shims, gamepad pumps and test scripts implement this; see
/// [`Controller::poll_sources`](crate::controller::Controller::poll_sources).
pub trait InputSource {
    /// Drains the events gathered since the previous call, oldest first.
    fn poll(&mut self) -> Vec<InputEvent>;
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}
