use crate::error::{Result, VendError};
use crate::machine::{Receipt, VendingMachine};
use crate::product::Product;
use crate::reader::{Command, OpKind};
use crate::vault::CoinBundle;

/// Output produced by a command, if any.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    None,
    Receipt(Receipt),
    Catalog(Vec<Product>),
}

/// Drives one machine through a scripted session.
///
/// Coins announced with `coin` rows accumulate in a staging bundle; the
/// next `insert` row hands the whole bundle to the machine in a single
/// `insert_money` call, preserving its replace-not-merge contract.
pub struct Session {
    machine: VendingMachine,
    staged: CoinBundle,
}

impl Session {
    pub fn new(machine: VendingMachine) -> Self {
        Self {
            machine,
            staged: CoinBundle::new(),
        }
    }

    pub fn machine(&self) -> &VendingMachine {
        &self.machine
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command.op {
            OpKind::Select => {
                let id = required(command.product, "product")?;
                let qty = required(command.qty, "qty")?;
                self.machine.select_product(id, qty)?;
            }
            OpKind::Update => {
                let id = required(command.product, "product")?;
                let delta = required(command.qty, "qty")?;
                self.machine.update_selection(id, delta)?;
            }
            OpKind::Remove => {
                let id = required(command.product, "product")?;
                self.machine.remove_selection(id)?;
            }
            OpKind::Clear => {
                self.machine.clear_selection()?;
            }
            OpKind::Coin => {
                let value = required(command.value, "value")?;
                let count = required(command.count, "count")?;
                *self.staged.entry(value).or_insert(0) += count;
            }
            OpKind::Insert => {
                let offer = std::mem::take(&mut self.staged);
                self.machine.insert_money(offer)?;
            }
            OpKind::Process => {
                let receipt = self.machine.process_transaction()?;
                return Ok(Outcome::Receipt(receipt));
            }
            OpKind::Catalog => {
                let catalog = self.machine.show_catalog()?;
                return Ok(Outcome::Catalog(catalog.into_iter().cloned().collect()));
            }
            OpKind::Maintenance => {
                self.machine.enter_maintenance()?;
            }
            OpKind::Resume => {
                self.machine.exit_maintenance()?;
            }
            OpKind::Halt => {
                self.machine.take_out_of_service();
            }
            OpKind::Stock => {
                let product = Product::new(
                    required(command.product, "product")?,
                    &required(command.name, "name")?,
                    required(command.price, "price")?,
                    u32::try_from(required(command.qty, "qty")?)
                        .map_err(|_| VendError::InvalidQuantity(command.qty.unwrap_or(0)))?,
                    required(command.capacity, "capacity")?,
                )?;
                self.machine.add_stock(vec![product])?;
            }
        }
        Ok(Outcome::None)
    }
}

fn required<T>(column: Option<T>, name: &str) -> Result<T> {
    column.ok_or_else(|| VendError::Config(format!("command is missing the {name} column")))
}
