//! Create/edit user dialog
//!
//! - view_model.rs: form state, loading and submit command
//! - view.rs: Leptos component

mod view;
mod view_model;

pub use view::ManageUserDialog;
pub use view_model::ManageUserVm;
