//! Test utilities for EatReal.
//!
//! Provides `MockIdentity` for mobile-API headers and helpers that seal and
//! open session cookies. Import from tests only.

pub mod identity;
pub mod session;
