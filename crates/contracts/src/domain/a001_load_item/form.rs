use super::aggregate::{LoadItem, LoadItemDraft};
use super::error::LedgerError;
use crate::shared::limits::{
    character_max_message, LOAD_ITEMS_QUANTITY_MAX, LOAD_ITEMS_WEIGHT_MAX, LOAD_ITEM_NAME_MAX,
};
use crate::shared::validation::{required_message, FieldErrors};
use serde::{Deserialize, Serialize};

/// Raw text of the add/edit load item form, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadItemForm {
    pub item_name: String,
    pub item_quantity: String,
    pub item_weight: String,
}

impl Default for LoadItemForm {
    fn default() -> Self {
        Self {
            item_name: String::new(),
            item_quantity: "1".to_string(),
            item_weight: "1".to_string(),
        }
    }
}

impl LoadItemForm {
    /// State of the add form after an item was admitted
    pub fn cleared() -> Self {
        Self {
            item_weight: String::new(),
            ..Self::default()
        }
    }

    /// Edit-row form prefilled from an existing item
    pub fn from_item(item: &LoadItem) -> Self {
        Self {
            item_name: item.name.clone(),
            item_quantity: item.quantity.to_string(),
            item_weight: format_weight(item.weight),
        }
    }

    /// Whether the row differs from the item it was created from
    pub fn is_dirty_against(&self, item: &LoadItem) -> bool {
        *self != Self::from_item(item)
    }

    /// The add button stays disabled until name and weight are filled in
    pub fn can_submit(&self) -> bool {
        !self.item_name.trim().is_empty() && !self.item_weight.trim().is_empty()
    }

    pub fn quantity_value(&self) -> u32 {
        self.item_quantity.trim().parse::<u32>().unwrap_or(1).max(1)
    }

    pub fn increment_quantity(&mut self) {
        self.item_quantity = self.quantity_value().saturating_add(1).to_string();
    }

    /// Never goes below 1
    pub fn decrement_quantity(&mut self) {
        self.item_quantity = self.quantity_value().saturating_sub(1).max(1).to_string();
    }

    /// Keep digits only; an empty field falls back to 1
    pub fn set_quantity_input(&mut self, text: &str) {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        self.item_quantity = if digits.is_empty() {
            "1".to_string()
        } else {
            digits
        };
    }

    pub fn validate(&self) -> Result<LoadItemDraft, LedgerError> {
        let mut errors = FieldErrors::new();

        let name = self.item_name.trim();
        if name.is_empty() {
            errors.add("item_name", required_message("name"));
        } else if name.chars().count() > LOAD_ITEM_NAME_MAX {
            errors.add("item_name", character_max_message("Name", LOAD_ITEM_NAME_MAX));
        }

        let quantity_text = self.item_quantity.trim();
        let quantity = if quantity_text.is_empty() {
            Some(1)
        } else if quantity_text.chars().count() > LOAD_ITEMS_QUANTITY_MAX {
            errors.add(
                "item_quantity",
                character_max_message("Quantity", LOAD_ITEMS_QUANTITY_MAX),
            );
            None
        } else {
            match quantity_text.parse::<u32>() {
                Ok(q) if q >= 1 => Some(q),
                _ => {
                    errors.add("item_quantity", "Quantity must be a whole number of at least 1");
                    None
                }
            }
        };

        let weight_text = self.item_weight.trim();
        let weight = if weight_text.is_empty() {
            errors.add("item_weight", required_message("weight"));
            None
        } else if weight_text.chars().count() > LOAD_ITEMS_WEIGHT_MAX {
            errors.add(
                "item_weight",
                character_max_message("Weight", LOAD_ITEMS_WEIGHT_MAX),
            );
            None
        } else {
            match weight_text.parse::<f64>() {
                Ok(w) if w.is_finite() && w > 0.0 => Some(w),
                _ => {
                    errors.add("item_weight", "Weight must be a number greater than 0");
                    None
                }
            }
        };

        match (quantity, weight) {
            (Some(quantity), Some(weight)) if errors.is_empty() => {
                LoadItemDraft::new(name, quantity, weight)
            }
            _ => Err(LedgerError::ValidationFailed(errors)),
        }
    }
}

/// `12` rather than `12.0`, `12.5` unchanged
fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        weight.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_load_item::aggregate::LoadItemId;

    fn form(name: &str, quantity: &str, weight: &str) -> LoadItemForm {
        LoadItemForm {
            item_name: name.to_string(),
            item_quantity: quantity.to_string(),
            item_weight: weight.to_string(),
        }
    }

    #[test]
    fn test_defaults_and_cleared() {
        let initial = LoadItemForm::default();
        assert_eq!(initial.item_quantity, "1");
        assert_eq!(initial.item_weight, "1");
        assert!(!initial.can_submit());

        let cleared = LoadItemForm::cleared();
        assert_eq!(cleared.item_name, "");
        assert_eq!(cleared.item_quantity, "1");
        assert_eq!(cleared.item_weight, "");
    }

    #[test]
    fn test_validate_ok() {
        let draft = form(" Tiles ", "", "12.5").validate().unwrap();
        assert_eq!(draft.name(), "Tiles");
        assert_eq!(draft.quantity(), 1);
        assert_eq!(draft.weight(), 12.5);
    }

    #[test]
    fn test_validate_reports_every_field() {
        let err = form("", "0", "abc").validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("item_name"), Some("Please enter name"));
        assert!(errors.contains("item_quantity"));
        assert!(errors.contains("item_weight"));

        let err = form("Box", "1", "").validate().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("item_weight"),
            Some("Please enter weight")
        );
    }

    #[test]
    fn test_validate_length_limits() {
        let long_quantity = "9".repeat(LOAD_ITEMS_QUANTITY_MAX + 1);
        let err = form("Box", &long_quantity, "1").validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains("item_quantity"));

        let long_weight = "1".repeat(LOAD_ITEMS_WEIGHT_MAX + 1);
        let err = form("Box", "1", &long_weight).validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains("item_weight"));
    }

    #[test]
    fn test_quantity_stepper() {
        let mut f = LoadItemForm::default();
        f.increment_quantity();
        f.increment_quantity();
        assert_eq!(f.item_quantity, "3");
        f.decrement_quantity();
        f.decrement_quantity();
        f.decrement_quantity();
        assert_eq!(f.item_quantity, "1");

        f.set_quantity_input("1a2");
        assert_eq!(f.item_quantity, "12");
        f.set_quantity_input("");
        assert_eq!(f.item_quantity, "1");
    }

    #[test]
    fn test_dirty_tracking_against_item() {
        let item = LoadItem::persisted(
            LoadItemId(3),
            &LoadItemDraft::new("Drum", 2, 40.0).unwrap(),
        );
        let mut row = LoadItemForm::from_item(&item);
        assert_eq!(row.item_weight, "40");
        assert!(!row.is_dirty_against(&item));

        row.increment_quantity();
        assert!(row.is_dirty_against(&item));
    }
}
