//! Load item dialog for one shipment package
//!
//! - view_model.rs: ledger-backed state and commands (add, edit, two-step delete)
//! - view.rs: Leptos components (dialog, edit rows)

mod view;
mod view_model;

pub use view::LoadItemDialog;
pub use view_model::{BudgetErrorTarget, LoadItemDialogVm};
