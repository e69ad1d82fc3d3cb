//! sea-orm entities for the EatReal database.

pub mod friends;
pub mod images;
pub mod restaurants;
pub mod users;
pub mod visit_companions;
pub mod visits;
