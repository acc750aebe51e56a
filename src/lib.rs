//! gameinput: named logical axes and buttons over keyboard, pointer and gamepad input.
//!
//! Define a control once, drive it from any device:
//!
//! ```
//! use gameinput::{Controller, GamepadState, Influence};
//!
//! let mut input = Controller::new();
//! input
//!     .get_or_create_button("jump")
//!     .add_influence(Influence::new().key(" ").gp_button(0));
//!
//! assert!(!input.button_value("jump").unwrap());
//!
//! input.register_gamepad(GamepadState::standard(0, "pad"));
//! input.set_gamepad_button(0, 0, true);
//! assert!(input.button_value("jump").unwrap());
//! ```
//!
//! - [`Button`]s are pressed while **any** influence is active.
//! - [`Axis`] values come from the **first** active influence in insertion order.
//! - Layouts can be loaded from JSON or TOML, see [`InputConfig`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod axis;
pub mod backends;
pub mod button;
pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod event;
pub mod gamepad;
pub mod influence;
pub mod snapshot;
pub mod state;
pub mod viewport;

pub use axis::Axis;
pub use button::Button;
pub use config::{AxisConfig, AxisInfluenceConfig, ButtonConfig, InfluenceConfig, InputConfig};
pub use controller::Controller;
pub use device::InputSource;
pub use error::{ControlKind, InputError, Result};
pub use event::InputEvent;
pub use gamepad::{GamepadRegistry, GamepadState};
pub use influence::{AxisInfluence, Influence, InfluenceId, PointerAxis, TouchRect};
pub use snapshot::ControlSnapshot;
pub use state::{ConsumerId, DeviceState};
pub use viewport::Viewport;

#[cfg(feature = "virtual")]
pub use backends::virtual_input::VirtualSource;
