//! pl-core: stable foundation for pidloop.
//!
//! Contains:
//! - parameter (bounded, named tunables + the exchange record shape)
//! - component (the IoComponent capability and loop roles)
//! - time (fixed simulation time step on top of uom)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod component;
pub mod error;
pub mod numeric;
pub mod parameter;
pub mod time;

// Re-exports: nice ergonomics for downstream crates
pub use component::{IoComponent, Role, set_component_defaults};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use parameter::{Parameter, ParameterSet};
pub use time::TimeStep;
