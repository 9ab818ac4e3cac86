//! # API Shared
//!
//! Shared request/response types for the patient management APIs.
//!
//! Contains:
//! - Wire DTOs for patient records (`wire` module), with OpenAPI schemas
//! - The [`Field`] wrapper used to tell "absent" apart from "provided" in sparse updates
//! - Shared services like `HealthService`
//!
//! Used by `pms-core`, `api-rest` and the CLI.

pub mod field;
pub mod health;
pub mod wire;

pub use field::Field;
pub use health::HealthService;
pub use wire::*;
