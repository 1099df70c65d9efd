//! Dosette - validation server for FHIR medication records
//!
//! Exposes the decode/encode pipeline of `dosette-codec` over HTTP: clients
//! POST a resource, the server decodes it with full structural validation and
//! echoes the canonical encoding back, or returns an OperationOutcome
//! describing the first violation.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
