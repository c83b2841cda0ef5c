pub mod catalog;
pub mod ledger;
pub mod persistence;

pub use catalog::{Catalog, MAX_PRODUCTS};
pub use ledger::TransactionLog;
pub use persistence::{JsonFile, load, save};
