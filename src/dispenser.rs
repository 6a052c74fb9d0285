use std::collections::BTreeMap;

use crate::product::Product;

/// The stock ledger: product id to catalog entry, iterated in id order.
#[derive(Default)]
pub struct Dispenser {
    products: BTreeMap<u32, Product>,
}

impl Dispenser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, replacing any existing entry with the same id.
    pub fn add(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn has(&self, id: u32) -> bool {
        self.products.contains_key(&id)
    }

    /// True when the product exists and carries at least `qty` units.
    pub fn can_dispense(&self, id: u32, qty: u32) -> bool {
        match self.products.get(&id) {
            Some(product) => product.quantity >= qty,
            None => false,
        }
    }

    /// Decrements stock. Callers must have validated with
    /// [`can_dispense`](Dispenser::can_dispense) first.
    pub fn dispense(&mut self, id: u32, qty: u32) {
        if let Some(product) = self.products.get_mut(&id) {
            product.dispense(qty);
        }
    }

    pub fn catalog(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
