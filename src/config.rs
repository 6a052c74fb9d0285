use std::io::Read;

use serde::Deserialize;

use crate::denomination::Denomination;
use crate::dispenser::Dispenser;
use crate::error::{Result, VendError};
use crate::machine::VendingMachine;
use crate::product::Product;
use crate::vault::Vault;

/// Machine setup: the vault denominations in chain order and the initial
/// catalog.
#[derive(Debug, Deserialize)]
pub struct MachineConfig {
    pub denominations: Vec<Denomination>,
    pub products: Vec<Product>,
}

impl MachineConfig {
    pub fn from_reader(source: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Validates the setup and assembles an idle machine from it.
    pub fn build(self) -> Result<VendingMachine> {
        let vault = Vault::new(self.denominations)?;

        let mut dispenser = Dispenser::new();
        for product in self.products {
            if product.quantity > product.capacity {
                return Err(VendError::Config(format!(
                    "product {} stocked with {} over capacity {}",
                    product.id, product.quantity, product.capacity
                )));
            }
            if dispenser.has(product.id) {
                return Err(VendError::Config(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            dispenser.add(product);
        }

        Ok(VendingMachine::new(dispenser, vault))
    }
}
