//! Common utilities module
//!
//! This module contains shared utilities used across the sonar pipeline.

pub mod error;

pub use error::{ErrorKind, Result, SonarError};
