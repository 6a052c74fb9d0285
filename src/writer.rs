use std::io::Write;

use crate::error::Result;
use crate::machine::VendingMachine;

/// Writes the machine's final ledgers as two CSV tables: the catalog and
/// the vault.
pub struct StateWriter<W: Write> {
    inner: W,
}

impl<W: Write> StateWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_state(&mut self, machine: &VendingMachine) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.inner);
        wtr.write_record(["id", "name", "price", "quantity", "capacity"])?;
        for product in machine.stock().catalog() {
            wtr.write_record([
                product.id.to_string(),
                product.name.clone(),
                product.price.to_string(),
                product.quantity.to_string(),
                product.capacity.to_string(),
            ])?;
        }
        wtr.flush()?;
        drop(wtr);

        writeln!(self.inner)?;

        let mut wtr = csv::Writer::from_writer(&mut self.inner);
        wtr.write_record(["id", "value", "capacity", "count"])?;
        for denomination in machine.vault().denominations() {
            wtr.write_record([
                denomination.id.to_string(),
                denomination.value.to_string(),
                denomination.capacity.to_string(),
                denomination.count.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
