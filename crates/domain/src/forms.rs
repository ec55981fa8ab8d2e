//! Raw form input and its validation.
//!
//! Forms carry text exactly as entered. Validation either yields a complete
//! record or rejects the whole submission, so a bad field never leads to a
//! partial write.

use serde::{Deserialize, Serialize};
use store::{InventoryRecord, MenuItem};
use thiserror::Error;

/// Reasons a form submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A numeric field did not contain a usable number.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// A field that must be zero or more was negative.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

/// Menu item fields as submitted from an edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub calories: String,
    pub category: String,
}

impl MenuItemForm {
    /// Validates every field and builds the menu item.
    pub fn validate(&self) -> Result<MenuItem, ValidationError> {
        let name = required("name", &self.name)?;
        let price = required("price", &self.price)?;
        let calories = required("calories", &self.calories)?;
        let category = required("category", &self.category)?;

        let price = parse_price(price)?;
        let calories = parse_calories(calories)?;

        Ok(MenuItem::new(
            name,
            self.description.trim(),
            price,
            calories,
            category,
        ))
    }
}

impl From<&MenuItem> for MenuItemForm {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            calories: item.calories.to_string(),
            category: item.category.clone(),
        }
    }
}

/// Inventory fields as submitted from an edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryForm {
    pub item_name: String,
    pub quantity: String,
    pub category: String,
}

impl InventoryForm {
    /// Validates every field and builds the inventory record.
    ///
    /// Any integer quantity is accepted, including negative counts.
    pub fn validate(&self) -> Result<InventoryRecord, ValidationError> {
        let item_name = required("item name", &self.item_name)?;
        let quantity = required("quantity", &self.quantity)?;
        let quantity = quantity
            .parse::<i64>()
            .map_err(|_| not_a_number("quantity", quantity))?;

        Ok(InventoryRecord::new(
            item_name,
            quantity,
            self.category.trim(),
        ))
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(value)
    }
}

fn not_a_number(field: &'static str, value: &str) -> ValidationError {
    ValidationError::NotANumber {
        field,
        value: value.to_string(),
    }
}

fn parse_price(value: &str) -> Result<f64, ValidationError> {
    let price = value
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| not_a_number("price", value))?;
    if price < 0.0 {
        return Err(ValidationError::Negative { field: "price" });
    }
    Ok(price)
}

fn parse_calories(value: &str) -> Result<u32, ValidationError> {
    let calories = value
        .parse::<i64>()
        .map_err(|_| not_a_number("calories", value))?;
    if calories < 0 {
        return Err(ValidationError::Negative { field: "calories" });
    }
    u32::try_from(calories).map_err(|_| not_a_number("calories", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger_form() -> MenuItemForm {
        MenuItemForm {
            name: "Burger".into(),
            description: "A juicy beef burger".into(),
            price: "10.99".into(),
            calories: "500".into(),
            category: "Entrees".into(),
        }
    }

    #[test]
    fn valid_menu_form_builds_item() {
        let item = burger_form().validate().unwrap();
        assert_eq!(
            item,
            MenuItem::new("Burger", "A juicy beef burger", 10.99, 500, "Entrees")
        );
    }

    #[test]
    fn menu_form_fields_are_trimmed() {
        let form = MenuItemForm {
            name: "  Fries ".into(),
            price: " 3.5".into(),
            calories: "320 ".into(),
            category: " Sides".into(),
            ..Default::default()
        };
        let item = form.validate().unwrap();
        assert_eq!(item.name, "Fries");
        assert_eq!(item.price, 3.5);
        assert_eq!(item.calories, 320);
        assert_eq!(item.category, "Sides");
        assert_eq!(item.description, "");
    }

    #[test]
    fn blank_name_is_missing() {
        let form = MenuItemForm {
            name: "   ".into(),
            ..burger_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn blank_category_is_missing() {
        let form = MenuItemForm {
            category: String::new(),
            ..burger_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "category" })
        );
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        for bad in ["ten", "10,99", "NaN", "inf"] {
            let form = MenuItemForm {
                price: bad.into(),
                ..burger_form()
            };
            assert!(
                matches!(
                    form.validate(),
                    Err(ValidationError::NotANumber { field: "price", .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn negative_price_and_calories_are_rejected() {
        let form = MenuItemForm {
            price: "-1".into(),
            ..burger_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Negative { field: "price" })
        );

        let form = MenuItemForm {
            calories: "-20".into(),
            ..burger_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Negative { field: "calories" })
        );
    }

    #[test]
    fn fractional_calories_are_not_a_number() {
        let form = MenuItemForm {
            calories: "12.5".into(),
            ..burger_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::NotANumber {
                field: "calories",
                value: "12.5".into()
            })
        );
    }

    #[test]
    fn form_from_item_validates_back_to_same_item() {
        let item = MenuItem::new("Shake", "Vanilla", 4.25, 610, "Desserts");
        assert_eq!(MenuItemForm::from(&item).validate().unwrap(), item);
    }

    #[test]
    fn inventory_form_accepts_negative_quantity() {
        let form = InventoryForm {
            item_name: "Buns".into(),
            quantity: "-4".into(),
            category: String::new(),
        };
        assert_eq!(
            form.validate().unwrap(),
            InventoryRecord::new("Buns", -4, "")
        );
    }

    #[test]
    fn inventory_form_rejects_bad_quantity() {
        let form = InventoryForm {
            item_name: "Buns".into(),
            quantity: "a dozen".into(),
            category: "Bakery".into(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::NotANumber {
                field: "quantity",
                ..
            })
        ));

        let form = InventoryForm {
            item_name: String::new(),
            quantity: "3".into(),
            category: String::new(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "item name" })
        );
    }
}
