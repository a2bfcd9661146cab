//! Builder API for wiring a controller to its host.
//!
//! The controller is constructed explicitly, once per shell, with every
//! collaborator handed in. There is no global instance.

pub mod controller;
pub mod error;

pub use controller::ControllerBuilder;
pub use error::BuildError;
