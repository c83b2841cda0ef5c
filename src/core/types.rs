use super::{InventoryError, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of transaction timestamps, e.g. `2024-05-01 14:03:22.104233`.
/// The fraction is left off when the microseconds are zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FRACTION_FORMAT: &str = "%.6f";

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format(TIMESTAMP_FORMAT).to_string()
    } else {
        at.format(&format!("{}{}", TIMESTAMP_FORMAT, FRACTION_FORMAT)).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub quantity: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, quantity: u64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Field overrides for an update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u64>,
}

impl ProductPatch {
    /// Builds a patch from raw text fields where an empty field means "leave
    /// unchanged". Whitespace is not empty and is parsed like any other value.
    ///
    /// Every field is parsed before anything is returned, so a bad price
    /// never leaves a half-applied name behind.
    pub fn from_input(name: &str, price: &str, quantity: &str) -> Result<Self> {
        let name = (!name.is_empty()).then(|| name.to_string());
        let price = if price.is_empty() {
            None
        } else {
            Some(parse_price(price)?)
        };
        let quantity = if quantity.is_empty() {
            None
        } else {
            Some(parse_quantity(quantity)?)
        };

        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "Add"),
            Operation::Remove => write!(f, "Remove"),
        }
    }
}

/// One recorded stock movement. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub product_id: String,
    pub quantity: u64,
    pub operation: Operation,
}

impl Transaction {
    /// Stamps the entry with the current local time.
    pub fn now(product_id: impl Into<String>, quantity: u64, operation: Operation) -> Self {
        Self {
            date: format_timestamp(&Local::now().naive_local()),
            product_id: product_id.into(),
            quantity,
            operation,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} of product ID {}",
            self.date, self.operation, self.quantity, self.product_id
        )
    }
}

/// Read-only projection used by the stock level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub quantity: u64,
}

pub fn parse_price(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let price: f64 = trimmed
        .parse()
        .map_err(|_| InventoryError::InvalidInput(format!("'{}' is not a valid price", trimmed)))?;

    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::InvalidInput(format!(
            "price must be a non-negative number, got '{}'",
            trimmed
        )));
    }
    Ok(price)
}

pub fn parse_quantity(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| {
        InventoryError::InvalidInput(format!("'{}' is not a valid quantity", trimmed))
    })
}

/// Like [`parse_quantity`] but rejects zero, for stock movements.
pub fn parse_movement(input: &str) -> Result<u64> {
    match parse_quantity(input)? {
        0 => Err(InventoryError::InvalidInput(
            "quantity must be greater than zero".to_string(),
        )),
        quantity => Ok(quantity),
    }
}
