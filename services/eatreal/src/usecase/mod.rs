pub mod auth;
pub mod map;
pub mod oauth;
pub mod profile;
pub mod restaurant;
pub mod review;
