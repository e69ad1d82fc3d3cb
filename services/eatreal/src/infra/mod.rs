pub mod db;
pub mod geocode;
pub mod oauth;
pub mod password;
