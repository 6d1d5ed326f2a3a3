//! Domain model for purchasable menu items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
}

/// A menu item before the catalog has assigned it an id.
///
/// This is also the exact document shape persisted to the `menuItems`
/// collection; the document id carries the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
}

impl MenuItem {
    pub fn from_draft(id: String, draft: MenuItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            category: draft.category,
        }
    }

    /// The persistable fields of this item, without the id.
    pub fn draft(&self) -> MenuItemDraft {
        MenuItemDraft {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

fn draft(name: &str, price: Decimal, description: &str, category: &str) -> MenuItemDraft {
    MenuItemDraft {
        name: name.to_string(),
        price,
        description: description.to_string(),
        category: category.to_string(),
    }
}

/// The seed catalog written when the remote collection is found empty.
pub fn default_menu_items() -> Vec<MenuItemDraft> {
    vec![
        draft(
            "Grilled Chicken Salad",
            Decimal::new(1299, 2),
            "Fresh salad with grilled chicken, mixed greens, and balsamic vinaigrette",
            "Salads",
        ),
        draft(
            "Vegetable Pasta",
            Decimal::new(1099, 2),
            "Penne pasta with seasonal vegetables and tomato sauce",
            "Pasta",
        ),
        draft(
            "Beef Burger",
            Decimal::new(1499, 2),
            "Juicy beef patty with lettuce, tomato, and special sauce",
            "Burgers",
        ),
        draft(
            "Margherita Pizza",
            Decimal::new(1399, 2),
            "Classic pizza with tomato sauce, mozzarella, and fresh basil",
            "Pizza",
        ),
        draft(
            "Chicken Wrap",
            Decimal::new(999, 2),
            "Grilled chicken with vegetables and sauce in a tortilla wrap",
            "Wraps",
        ),
        draft(
            "Caesar Salad",
            Decimal::new(899, 2),
            "Romaine lettuce, croutons, parmesan cheese with Caesar dressing",
            "Salads",
        ),
        draft(
            "Vegetable Soup",
            Decimal::new(699, 2),
            "Hearty soup with seasonal vegetables",
            "Soups",
        ),
        draft(
            "Fruit Salad",
            Decimal::new(799, 2),
            "Mix of fresh seasonal fruits",
            "Desserts",
        ),
    ]
}
