//! Closed-loop simulation for pidloop.
//!
//! Provides:
//! - Concrete driver, load and sensor models behind the shared `IoComponent` trait
//! - Fixed-step integrators for the physical state of loads
//! - `System`: the wired loop and its fixed-order stepping function
//! - `SystemGenerator` + `GeneratorRegistry` for named, default-tuned loops
//! - Run recording and CSV export

pub mod components;
pub mod error;
pub mod export;
pub mod generator;
pub mod integrator;
pub mod model;
pub mod presets;
pub mod sim;
pub mod system;

// Re-exports for public API
pub use components::{Accumulator, FirstOrderPlant, Gain, LowPassSensor, MassSpringDamper};
pub use error::{SimError, SimResult};
pub use export::{CSV_HEADER, write_csv};
pub use generator::{GeneratorRegistry, SystemGenerator};
pub use integrator::{ForwardEuler, Integrator, IntegratorType, RK4};
pub use model::Dynamics;
pub use sim::{RunOptions, Trajectory, run};
pub use system::{BoxedComponent, StepSignals, System, SystemBuilder, SystemState};
