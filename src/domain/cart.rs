use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CategoryId;

/// One requested line of a checkout. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub category_id: CategoryId,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(category_id: impl Into<CategoryId>, quantity: u32) -> Self {
        Self {
            category_id: category_id.into(),
            quantity,
        }
    }
}

/// Ordered cart lines; reservation follows this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart is empty")]
    Empty,
    #[error("line {line} for {category_id} requests zero tickets")]
    ZeroQuantity { line: usize, category_id: CategoryId },
}

impl Cart {
    pub fn with_item(mut self, category_id: impl Into<CategoryId>, quantity: u32) -> Self {
        self.items.push(CartItem::new(category_id, quantity));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shape checks that need no catalog lookup.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        match self.items.iter().position(|item| item.quantity == 0) {
            Some(line) => Err(CartError::ZeroQuantity {
                line,
                category_id: self.items[line].category_id.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_and_zero_lines() {
        assert_eq!(Cart::default().validate(), Err(CartError::Empty));

        let cart = Cart::default().with_item("category_1", 2).with_item("category_2", 0);
        assert_eq!(
            cart.validate(),
            Err(CartError::ZeroQuantity { line: 1, category_id: "category_2".to_string() })
        );

        assert!(Cart::default().with_item("category_1", 1).validate().is_ok());
    }
}
