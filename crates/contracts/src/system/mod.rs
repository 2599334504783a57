pub mod auth;
pub mod roles;
pub mod timezones;
pub mod users;
