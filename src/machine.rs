use std::fmt;

use serde::Serialize;

use crate::basket::Basket;
use crate::dispenser::Dispenser;
use crate::error::{Result, VendError};
use crate::product::Product;
use crate::vault::{CoinBundle, Vault, bundle_total};

/// The phases of one customer interaction. Each operation is permitted in a
/// fixed subset of states; everywhere else it fails with
/// `InvalidStateOperation` and leaves the machine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Idle,
    Selecting,
    AwaitingPayment,
    Settling,
    Maintenance,
    OutOfService,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineState::Idle => "idle",
            MachineState::Selecting => "selecting",
            MachineState::AwaitingPayment => "awaiting payment",
            MachineState::Settling => "settling",
            MachineState::Maintenance => "maintenance",
            MachineState::OutOfService => "out of service",
        };
        f.write_str(name)
    }
}

/// The outcome of a committed purchase: what it cost, what was inserted,
/// and the change broken down by denomination actually dispensed.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Receipt {
    pub total: i64,
    pub paid: i64,
    pub change: CoinBundle,
}

/// The purchase state machine.
///
/// Owns the stock ledger, the coin vault, the in-progress selection and the
/// pending payment. A purchase is settled with a decide-then-commit
/// sequence: every validation runs against current ledger snapshots first,
/// and only a fully validated purchase mutates anything.
pub struct VendingMachine {
    dispenser: Dispenser,
    vault: Vault,
    basket: Basket,
    payment: CoinBundle,
    state: MachineState,
}

impl VendingMachine {
    pub fn new(dispenser: Dispenser, vault: Vault) -> Self {
        Self {
            dispenser,
            vault,
            basket: Basket::new(),
            payment: CoinBundle::new(),
            state: MachineState::Idle,
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn stock(&self) -> &Dispenser {
        &self.dispenser
    }

    pub fn selection(&self) -> &Basket {
        &self.basket
    }

    pub fn pending_payment(&self) -> &CoinBundle {
        &self.payment
    }

    fn require(&self, op: &'static str, allowed: &[MachineState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(VendError::InvalidStateOperation {
                op,
                state: self.state,
            })
        }
    }

    /// Checks that the basket can grow to `requested` units of `id` given
    /// current stock. The customer-relevant number is what is on the shelf
    /// right now, not the slot capacity.
    fn check_stock(&self, id: u32, requested: i64) -> Result<()> {
        let product = self
            .dispenser
            .get(id)
            .ok_or(VendError::ProductUnavailable(id))?;
        if i64::from(product.quantity) < requested {
            return Err(VendError::ProductUnavailable(id));
        }
        Ok(())
    }

    /// Adds `qty` units of `id` to the selection, on top of any units
    /// already selected.
    pub fn select_product(&mut self, id: u32, qty: i64) -> Result<()> {
        use MachineState::*;
        self.require("select product", &[Idle, Selecting, AwaitingPayment])?;
        if qty <= 0 {
            return Err(VendError::InvalidQuantity(qty));
        }
        let requested = qty
            .checked_add(i64::from(self.basket.quantity_of(id)))
            .ok_or(VendError::InvalidQuantity(qty))?;
        self.check_stock(id, requested)?;

        // Stock fits in u32, so a passing check bounds the cast.
        self.basket.add(id, qty as u32);
        if self.state == Idle {
            self.state = Selecting;
        }
        Ok(())
    }

    /// Applies a signed delta to an existing selection entry. The resulting
    /// quantity must stay positive and within current stock.
    pub fn update_selection(&mut self, id: u32, delta: i64) -> Result<()> {
        use MachineState::*;
        self.require("update selection", &[Selecting, AwaitingPayment])?;
        let current = self.basket.quantity_of(id);
        if current == 0 {
            return Err(VendError::ProductUnavailable(id));
        }
        let updated = delta
            .checked_add(i64::from(current))
            .ok_or(VendError::InvalidQuantity(delta))?;
        if updated <= 0 {
            return Err(VendError::InvalidQuantity(updated));
        }
        self.check_stock(id, updated)?;

        self.basket.set(id, updated as u32);
        Ok(())
    }

    pub fn remove_selection(&mut self, id: u32) -> Result<()> {
        use MachineState::*;
        self.require("remove selection", &[Selecting, AwaitingPayment])?;
        if !self.basket.remove(id) {
            return Err(VendError::ProductUnavailable(id));
        }
        Ok(())
    }

    /// Abandons the purchase: basket and pending payment are destroyed and
    /// the machine returns to idle.
    pub fn clear_selection(&mut self) -> Result<()> {
        use MachineState::*;
        self.require("clear selection", &[Idle, Selecting, AwaitingPayment])?;
        self.basket.clear();
        self.payment.clear();
        self.state = Idle;
        Ok(())
    }

    /// Registers the customer's offered coins. Each call replaces the
    /// pending payment wholesale; offers are never merged.
    pub fn insert_money(&mut self, offer: CoinBundle) -> Result<()> {
        use MachineState::*;
        self.require("insert money", &[Selecting, AwaitingPayment])?;
        self.payment = offer;
        self.state = AwaitingPayment;
        Ok(())
    }

    /// Settles the purchase atomically.
    ///
    /// Validation (stock, funds, vault feasibility) runs against current
    /// ledger snapshots with no side effects; only a fully validated
    /// purchase commits. On success the machine returns to idle with the
    /// basket and payment cleared. On rejection every ledger, the basket
    /// and the payment are left untouched and the machine stays in the
    /// payment phase so the customer can correct and retry.
    pub fn process_transaction(&mut self) -> Result<Receipt> {
        use MachineState::*;
        self.require("process transaction", &[Selecting, AwaitingPayment])?;

        self.state = Settling;
        match self.settle() {
            Ok(receipt) => {
                self.basket.clear();
                self.payment.clear();
                self.state = Idle;
                Ok(receipt)
            }
            Err(e) => {
                self.state = AwaitingPayment;
                Err(e)
            }
        }
    }

    fn settle(&mut self) -> Result<Receipt> {
        // Decide: dispensability and total price over current stock.
        let mut total: i64 = 0;
        for (&id, &qty) in self.basket.items() {
            let product = self
                .dispenser
                .get(id)
                .ok_or(VendError::ProductUnavailable(id))?;
            if product.quantity < qty {
                return Err(VendError::InsufficientStock(id));
            }
            total += i64::from(product.price) * i64::from(qty);
        }

        let paid = bundle_total(&self.payment);
        let change = paid - total;
        if change < 0 {
            return Err(VendError::InsufficientFunds { paid, total });
        }

        if !self.vault.can_deposit(&self.payment) || !self.vault.can_withdraw(change) {
            return Err(VendError::ChangeUnavailable(change));
        }

        // Commit: payment in, change out, stock down. The pre-check ran
        // against the vault before the payment landed, so the greedy
        // change withdrawal can still fail against the reshaped vault;
        // that is a consistency fault, not a customer rejection, and the
        // deposit is retracted before surfacing it.
        if !self.vault.deposit(&self.payment) {
            return Err(VendError::SettlementFault);
        }
        let Some(dispensed) = self.vault.withdraw(change) else {
            self.vault.retract(&self.payment);
            return Err(VendError::SettlementFault);
        };
        for (&id, &qty) in self.basket.items() {
            self.dispenser.dispense(id, qty);
        }

        Ok(Receipt {
            total,
            paid,
            change: dispensed,
        })
    }

    /// Administrative transition; only an idle machine can be serviced.
    pub fn enter_maintenance(&mut self) -> Result<()> {
        self.require("enter maintenance", &[MachineState::Idle])?;
        self.state = MachineState::Maintenance;
        Ok(())
    }

    pub fn exit_maintenance(&mut self) -> Result<()> {
        self.require("exit maintenance", &[MachineState::Maintenance])?;
        self.state = MachineState::Idle;
        Ok(())
    }

    /// Locks the machine; every subsequent operation is rejected.
    pub fn take_out_of_service(&mut self) {
        self.state = MachineState::OutOfService;
    }

    /// Replenishes the stock ledger: new ids are inserted, existing ids
    /// replaced wholesale. No vault or basket interaction.
    pub fn add_stock(&mut self, products: Vec<Product>) -> Result<()> {
        self.require("add stock", &[MachineState::Maintenance])?;
        for product in products {
            self.dispenser.add(product);
        }
        Ok(())
    }

    pub fn show_catalog(&self) -> Result<Vec<&Product>> {
        use MachineState::*;
        self.require("show catalog", &[Idle, Maintenance])?;
        Ok(self.dispenser.catalog().collect())
    }
}
