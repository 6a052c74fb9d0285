use serde::{Deserialize, Serialize};

use crate::error::{Result, VendError};

/// A catalog entry with a bounded stock counter.
///
/// Prices are integer denomination units. Like the vault's coin counters,
/// the stock counter is a guarded leaf; the machine validates feasibility
/// before decrementing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub quantity: u32,
    pub capacity: u32,
}

impl Product {
    pub fn new(id: u32, name: &str, price: u32, quantity: u32, capacity: u32) -> Result<Self> {
        if quantity > capacity {
            return Err(VendError::Config(format!(
                "product {id} stocked with {quantity} over capacity {capacity}"
            )));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            price,
            quantity,
            capacity,
        })
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Removes `n` units. Only dispenses while stock is available; the
    /// machine validates that `n` never exceeds the quantity.
    pub fn dispense(&mut self, n: u32) {
        if self.is_available() {
            self.quantity = self.quantity.saturating_sub(n);
        }
    }
}
