//! Validation of geometry and settings using Stillwater's `Validation`.
//!
//! Checks accumulate every violation so a rejected commit or a rejected
//! settings file reports all of its problems at once.

pub mod rules;
pub mod violations;

pub use rules::{collect_violations, validate_offset, validate_settings, validate_size};
pub use violations::{GeometryViolation, SettingsViolation};
