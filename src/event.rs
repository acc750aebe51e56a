//! Device events.
//!
//! The host environment (window loop, browser shim, gilrs pump...) translates its
//! native notifications into [`InputEvent`]s and hands them to
//! [`Controller::apply`](crate::controller::Controller::apply) or exposes them
//! through an [`InputSource`](crate::device::InputSource).
//!
//! ## Value conventions
//! - **Keys** are identified by strings, e.g. `"w"`, `" "`, `"ArrowUp"`. No layout
//!   translation happens here; the identifier is compared verbatim.
//! - **Pointer buttons** are indices. `0` is the primary button, and touch input is
//!   reported as button `0` as well.
//! - **Pointer coordinates** are in host units (pixels). See
//!   [`Viewport`](crate::viewport::Viewport) for normalized / centered views.
//! - **Pointer deltas** are raw host units and are accumulated until the frame ends.
//! - **Gamepad axes** are normalized to `[-1.0, 1.0]`; values outside that range are
//!   clamped on write.

use crate::gamepad::GamepadState;

/// A single change reported by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    KeyDown { key: String },

    /// A key went up.
    KeyUp { key: String },

    /// A pointer button was pressed at `(x, y)`.
    PointerDown { button: u32, x: f32, y: f32 },

    /// A pointer button was released at `(x, y)`.
    PointerUp { button: u32, x: f32, y: f32 },

    /// The pointer moved to `(x, y)`; `(dx, dy)` is the relative motion.
    ///
    /// With a locked pointer the position is meaningless but the deltas keep coming.
    PointerMoved { x: f32, y: f32, dx: f32, dy: f32 },

    /// First touch point went down. Reported as pointer button `0`.
    TouchStart { x: f32, y: f32 },

    /// First touch point moved.
    TouchMoved { x: f32, y: f32 },

    /// First touch point lifted.
    TouchEnd { x: f32, y: f32 },

    /// The host aborted the touch sequence. Treated like a release.
    TouchCancel { x: f32, y: f32 },

    /// A gamepad appeared in slot `state.index`.
    GamepadConnected(GamepadState),

    /// The gamepad in slot `index` went away.
    GamepadDisconnected { index: usize },

    /// A button on the gamepad in slot `index` changed.
    GamepadButton {
        index: usize,
        button: usize,
        pressed: bool,
    },

    /// An axis on the gamepad in slot `index` changed.
    GamepadAxis { index: usize, axis: usize, value: f32 },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }

    /// `true` for events that only touch gamepad state.
    pub fn is_gamepad(&self) -> bool {
        matches!(
            self,
            InputEvent::GamepadConnected(_)
                | InputEvent::GamepadDisconnected { .. }
                | InputEvent::GamepadButton { .. }
                | InputEvent::GamepadAxis { .. }
        )
    }
}
