//! Controller and actuator blocks for pidloop.
//!
//! Every block here implements [`pl_core::IoComponent`], so it can sit in the
//! controller or driver slot of a closed loop without the loop knowing its
//! internals.
//!
//! # Architecture
//!
//! - **PID**: textbook discrete PID law, no built-in anti-windup
//! - **Saturation**: optional output clamp layered around any component
//! - **Actuator**: first-order lag with rate and position limits

pub mod actuator;
pub mod error;
pub mod pid;
pub mod saturation;

pub use actuator::{ActuatorState, FirstOrderActuator};
pub use error::{ControlError, ControlResult};
pub use pid::{PidController, PidGains, PidState};
pub use saturation::OutputClamp;
