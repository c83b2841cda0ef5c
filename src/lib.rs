// ============================================================================
// Stockroom Library
// ============================================================================

pub mod cli;
pub mod config;
pub mod core;
pub mod session;
pub mod storage;

// Re-export main types for convenience
pub use cli::App;
pub use config::SessionConfig;
pub use crate::core::{InventoryError, Operation, Product, ProductPatch, Result, StockLevel, Transaction};
pub use session::Session;
pub use storage::{Catalog, MAX_PRODUCTS, TransactionLog};

/// Opens a session, drives the menu over `input`/`output`, and saves on exit.
///
/// # Examples
///
/// ```
/// use stockroom::{SessionConfig, run_session};
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let config = SessionConfig::in_dir(dir.path());
///
/// let mut output = Vec::new();
/// run_session(&config, Cursor::new("4\n"), &mut output)?;
///
/// assert!(config.data_file.exists());
/// assert!(config.log_file.exists());
/// # Ok(())
/// # }
/// ```
pub fn run_session<R, W>(config: &SessionConfig, input: R, output: W) -> Result<()>
where
    R: std::io::BufRead,
    W: std::io::Write,
{
    let mut session = Session::open(config)?;
    App::new(&mut session, input, output).run()
}
