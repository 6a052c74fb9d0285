use thiserror::Error;

use crate::machine::MachineState;

pub type Result<T> = std::result::Result<T, VendError>;

#[derive(Error, Debug)]
pub enum VendError {
    #[error("{op} is not supported in {state} state")]
    InvalidStateOperation {
        op: &'static str,
        state: MachineState,
    },
    #[error("invalid quantity {0}, must be positive")]
    InvalidQuantity(i64),
    #[error("product {0} is not available")]
    ProductUnavailable(u32),
    #[error("not enough stock of product {0}")]
    InsufficientStock(u32),
    #[error("inserted {paid} but the selection costs {total}")]
    InsufficientFunds { paid: i64, total: i64 },
    #[error("cannot accept payment or return change of {0}")]
    ChangeUnavailable(i64),
    #[error("vault commit failed after a passing pre-check")]
    SettlementFault,
    #[error("config error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
