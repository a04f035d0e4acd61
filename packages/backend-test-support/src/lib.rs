//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: quiet logging
//! initialisation, unique value generators for isolated fixtures and
//! Problem Details assertions that do not depend on backend types.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
