//! Common test utilities shared by the integration tests.
//!
//! This module provides:
//! - Test fixtures (complete and partial settings mappings)
//! - Custom assertions over validation errors

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
