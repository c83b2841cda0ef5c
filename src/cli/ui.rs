use super::app::Screen;
use crate::core::{InventoryError, Product, StockLevel, Transaction};
use std::io::{self, Write};

const MAIN_ITEMS: &[&str] = &[
    "Product Management",
    "Inventory Operations",
    "View Transaction Log",
    "Exit",
];

const PRODUCT_ITEMS: &[&str] = &[
    "Add Product",
    "View Products",
    "Update Product",
    "Delete Product",
    "Back to Main Menu",
];

const OPERATION_ITEMS: &[&str] = &[
    "Add Stock",
    "Remove Stock",
    "View Stock Levels",
    "Back to Main Menu",
];

pub fn draw_menu<W: Write>(out: &mut W, screen: Screen) -> io::Result<()> {
    let (title, items) = match screen {
        Screen::Main => ("Inventory Management System", MAIN_ITEMS),
        Screen::Products => ("Product Management", PRODUCT_ITEMS),
        Screen::Operations => ("Inventory Operations", OPERATION_ITEMS),
        Screen::Exit => return Ok(()),
    };

    writeln!(out)?;
    writeln!(out, "{}", title)?;
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, item)?;
    }
    Ok(())
}

pub fn draw_products<'a, W, I>(out: &mut W, products: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a Product)>,
{
    writeln!(out)?;
    writeln!(out, "Current Products:")?;
    for (id, product) in products {
        writeln!(
            out,
            "ID: {}, Name: {}, Price: {}, Quantity: {}",
            id,
            product.name,
            format_price(product.price),
            product.quantity
        )?;
    }
    Ok(())
}

pub fn draw_stock_levels<'a, W, I>(out: &mut W, levels: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = StockLevel<'a>>,
{
    writeln!(out)?;
    writeln!(out, "Current Stock Levels:")?;
    for level in levels {
        writeln!(
            out,
            "ID: {}, Name: {}, Quantity: {}",
            level.id, level.name, level.quantity
        )?;
    }
    Ok(())
}

pub fn draw_transactions<'a, W, I>(out: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    writeln!(out)?;
    writeln!(out, "Transaction Log:")?;
    for entry in entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

/// Whole-number prices keep one decimal (`1.0`), the same as the JSON file
/// shows them. Magnitudes below `1e-4` or from `1e16` up switch to exponent
/// notation with a signed two-digit exponent (`1e-05`, `1e+16`).
fn format_price(price: f64) -> String {
    let magnitude = price.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", price);
        match sci.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        }
    } else if price.fract() == 0.0 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

/// Operator-facing text for a recoverable error.
pub fn error_message(err: &InventoryError) -> String {
    match err {
        InventoryError::ProductNotFound(_) => "Product not found.".to_string(),
        InventoryError::ProductExists(_) => "Product already exists.".to_string(),
        InventoryError::CatalogFull(limit) => {
            format!("Limit reached. Only {} products allowed.", limit)
        }
        InventoryError::InsufficientStock { .. } => "Not enough stock available.".to_string(),
        other => other.to_string(),
    }
}
