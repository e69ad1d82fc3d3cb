//! Domain values shared across EatReal crates.
//!
//! Pure types with no framework dependencies. Import in `usecase/` and
//! `domain/` layers; `infra/` and `handlers/` only convert to and from them.

pub mod account;
pub mod error;
pub mod geo;
pub mod price;
pub mod rating;
pub mod stats;

pub use error::ValidationError;
