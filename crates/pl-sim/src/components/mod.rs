//! Concrete loop components.
//!
//! Each block implements [`IoComponent`](pl_core::IoComponent) and keeps its
//! tunables in a `ParameterSet`, so it can fill any slot its semantics fit.

pub mod accumulator;
pub mod gain;
pub mod plant;
pub mod sensor;

pub use accumulator::Accumulator;
pub use gain::Gain;
pub use plant::{FirstOrderPlant, MassSpringDamper};
pub use sensor::LowPassSensor;
