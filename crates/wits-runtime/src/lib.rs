#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod coordinator;
mod error;
mod generator;
mod queue;
mod session;

pub use coordinator::{PresentationCoordinator, PresentationStatus};
pub use error::{GeneratorError, SessionError};
pub use generator::{BackgroundGenerator, GeneratorOptions, GeneratorState, GeneratorStatus};
pub use session::DebateSession;

// Silence unused dev-dependency warnings for deps only the integration tests use
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
