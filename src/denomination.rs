use serde::{Deserialize, Serialize};

/// A single coin type held by the vault: a face value and a bounded
/// on-hand count.
///
/// The counter itself is deliberately dumb. Capacity and feasibility are
/// enforced by the settlement chain in [`crate::vault`], which is the only
/// mutator of these counts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Denomination {
    pub id: u32,
    pub value: u32,
    pub capacity: u32,
    #[serde(default)]
    pub count: u32,
}

impl Denomination {
    pub fn new(id: u32, value: u32, capacity: u32) -> Self {
        Self {
            id,
            value,
            capacity,
            count: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.count > 0
    }

    /// Adds `n` coins. Callers must have validated capacity beforehand.
    pub fn deposit(&mut self, n: u32) {
        self.count += n;
    }

    /// Removes `n` coins. Only withdraws while coins are available; the
    /// chain validates that `n` never exceeds the count.
    pub fn withdraw(&mut self, n: u32) {
        if self.is_available() {
            self.count = self.count.saturating_sub(n);
        }
    }
}
