//! Request identity for EatReal.
//!
//! Browser clients carry a sealed session cookie ([`session::Session`]).
//! The mobile client names its user in the `X-User-Email` header
//! ([`identity::EmailIdentity`]).

pub mod identity;
pub mod session;
