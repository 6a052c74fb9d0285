use std::collections::BTreeMap;

use crate::denomination::Denomination;
use crate::error::{Result, VendError};

/// Coin counts keyed by unit value.
pub type CoinBundle = BTreeMap<u32, u32>;

/// Total monetary value of a bundle.
pub fn bundle_total(bundle: &CoinBundle) -> i64 {
    bundle
        .iter()
        .map(|(&value, &count)| i64::from(value) * i64::from(count))
        .sum()
}

/// The settlement chain over all denominations in the vault.
///
/// Links are walked in construction order, which fixes the greedy
/// withdrawal tie-break. Every mutating operation is all-or-nothing: a
/// failing link undoes whatever earlier links already applied in the same
/// call.
pub struct Vault {
    links: Vec<Denomination>,
}

impl Vault {
    /// Builds the chain. Link order is fixed from here on.
    pub fn new(links: Vec<Denomination>) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for link in &links {
            if link.value == 0 {
                return Err(VendError::Config(format!(
                    "denomination {} has zero value",
                    link.id
                )));
            }
            if link.count > link.capacity {
                return Err(VendError::Config(format!(
                    "denomination {} holds {} coins over capacity {}",
                    link.id, link.count, link.capacity
                )));
            }
            if !seen.insert(link.value) {
                return Err(VendError::Config(format!(
                    "duplicate denomination value {}",
                    link.value
                )));
            }
        }
        Ok(Self { links })
    }

    pub fn denominations(&self) -> &[Denomination] {
        &self.links
    }

    pub fn total(&self) -> i64 {
        self.links
            .iter()
            .map(|d| i64::from(d.value) * i64::from(d.count))
            .sum()
    }

    /// True when every offered value present in the chain fits within its
    /// capacity. Offered values the chain does not carry are ignored.
    pub fn can_deposit(&self, offer: &CoinBundle) -> bool {
        self.links.iter().all(|link| match offer.get(&link.value) {
            Some(&n) => u64::from(link.count) + u64::from(n) <= u64::from(link.capacity),
            None => true,
        })
    }

    /// Deposits the whole offer or nothing. Returns false and restores all
    /// counts if any link would exceed its capacity.
    pub fn deposit(&mut self, offer: &CoinBundle) -> bool {
        let mut applied: Vec<(usize, u32)> = Vec::new();
        for i in 0..self.links.len() {
            let link = &mut self.links[i];
            let Some(&n) = offer.get(&link.value) else {
                continue;
            };
            if u64::from(link.count) + u64::from(n) > u64::from(link.capacity) {
                for &(j, m) in applied.iter().rev() {
                    self.links[j].withdraw(m);
                }
                return false;
            }
            link.deposit(n);
            applied.push((i, n));
        }
        true
    }

    /// Greedy feasibility check: each link takes
    /// `min(remaining / value, count)` and forwards the rest. Feasible only
    /// if the final remainder is zero.
    ///
    /// Greedy is not optimal change-making: an order that spends large
    /// coins first can leave an unmakeable remainder even when another
    /// combination exists. That limitation is part of the contract.
    pub fn can_withdraw(&self, amount: i64) -> bool {
        if amount < 0 {
            return false;
        }
        let mut remaining = amount;
        for link in &self.links {
            let take = (remaining / i64::from(link.value)).min(i64::from(link.count));
            remaining -= take * i64::from(link.value);
        }
        remaining == 0
    }

    /// Withdraws `amount` with the same greedy walk as [`can_withdraw`],
    /// decrementing counts as it goes. A nonzero final remainder undoes
    /// every decrement and yields `None`; on success the per-denomination
    /// counts actually taken are returned.
    ///
    /// [`can_withdraw`]: Vault::can_withdraw
    pub fn withdraw(&mut self, amount: i64) -> Option<CoinBundle> {
        if amount < 0 {
            return None;
        }
        let mut remaining = amount;
        let mut taken: Vec<(usize, u32)> = Vec::new();
        for i in 0..self.links.len() {
            let link = &mut self.links[i];
            let take = (remaining / i64::from(link.value)).min(i64::from(link.count));
            if take > 0 {
                link.withdraw(take as u32);
                taken.push((i, take as u32));
                remaining -= take * i64::from(link.value);
            }
        }
        if remaining != 0 {
            for &(i, n) in taken.iter().rev() {
                self.links[i].deposit(n);
            }
            return None;
        }
        Some(
            taken
                .into_iter()
                .map(|(i, n)| (self.links[i].value, n))
                .collect(),
        )
    }

    /// Removes exactly the given counts again. Used by the machine to undo
    /// a committed payment deposit when the follow-up change withdrawal
    /// fails against the reshaped vault.
    pub(crate) fn retract(&mut self, offer: &CoinBundle) {
        for link in &mut self.links {
            if let Some(&n) = offer.get(&link.value) {
                link.withdraw(n);
            }
        }
    }
}
