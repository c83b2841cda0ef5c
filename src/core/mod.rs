pub mod error;
pub mod types;

pub use error::{InventoryError, Result};
pub use types::{
    Operation, Product, ProductPatch, StockLevel, Transaction, parse_movement, parse_price,
    parse_quantity,
};
