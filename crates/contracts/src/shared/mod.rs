pub mod api;
pub mod lenient;
pub mod limits;
pub mod notification;
pub mod validation;
