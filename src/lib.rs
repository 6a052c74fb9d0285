pub mod basket;
pub mod config;
pub mod denomination;
pub mod dispenser;
pub mod error;
pub mod machine;
pub mod product;
pub mod reader;
pub mod session;
pub mod vault;
pub mod writer;
