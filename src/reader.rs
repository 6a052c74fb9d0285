use std::io::Read;

use serde::Deserialize;

use crate::error::{Result, VendError};

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Select,
    Update,
    Remove,
    Clear,
    Coin,
    Insert,
    Process,
    Catalog,
    Maintenance,
    Resume,
    Halt,
    Stock,
}

/// One row of a session script. Which columns are required depends on the
/// operation; the session dispatcher validates them.
///
/// `insert_money` replaces the pending payment wholesale, so a
/// multi-denomination offer cannot live in a single row: `coin` rows stage
/// counts and the following `insert` row submits the staged bundle as one
/// offer.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct Command {
    pub op: OpKind,
    pub product: Option<u32>,
    pub qty: Option<i64>,
    pub value: Option<u32>,
    pub count: Option<u32>,
    pub name: Option<String>,
    pub price: Option<u32>,
    pub capacity: Option<u32>,
}

pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendError::from))
    }
}
