//! Maximum field lengths enforced by the client-side forms.
//!
//! Lengths count characters, not bytes.

/// Load item name
pub const LOAD_ITEM_NAME_MAX: usize = 100;
/// Digits allowed in the load item quantity field
pub const LOAD_ITEMS_QUANTITY_MAX: usize = 6;
/// Characters allowed in the load item weight field (decimal point included)
pub const LOAD_ITEMS_WEIGHT_MAX: usize = 10;

pub const FIRST_NAME: usize = 50;
pub const LAST_NAME: usize = 50;
pub const EMAIL: usize = 100;

/// Message shown when a field is longer than allowed
pub fn character_max_message(field: &str, max: usize) -> String {
    format!("{} must be at most {} characters", field, max)
}
