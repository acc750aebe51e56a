//! Input sources shipped with `gameinput`.
//!
//! # Feature flags
//! - **`virtual`** (default): a scripted [`VirtualSource`](virtual_input::VirtualSource)
//!   for tests, demos and replaying recorded input.
//!
//! Hosts wire their own windowing or gamepad library by implementing
//! [`InputSource`](crate::device::InputSource).

#[cfg(feature = "virtual")]
#[cfg_attr(docsrs, doc(cfg(feature = "virtual")))]
pub mod virtual_input;
