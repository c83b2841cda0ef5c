use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Product '{0}' not found")]
    ProductNotFound(String),

    #[error("Product '{0}' already exists")]
    ProductExists(String),

    #[error("Limit reached. Only {0} products allowed")]
    CatalogFull(usize),

    #[error("Not enough stock for product '{product_id}': requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u64,
        available: u64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input stream closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InventoryError {
    /// User mistakes the menu reports and moves past. Everything else ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound(_)
                | Self::ProductExists(_)
                | Self::CatalogFull(_)
                | Self::InsufficientStock { .. }
                | Self::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
