use serde::{Deserialize, Serialize};

/// A dish on the canteen menu. Prices are whole currency units and never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
}

impl NewMenuItem {
    pub fn validate(&self) -> Result<(), String> {
        if self.price < 0 {
            return Err("price must be positive".to_string());
        }
        Ok(())
    }
}
