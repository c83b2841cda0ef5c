use super::ui;
use crate::core::{InventoryError, ProductPatch, Result, parse_movement, parse_price, parse_quantity};
use crate::session::Session;
use crate::storage::MAX_PRODUCTS;
use log::{debug, warn};
use std::io::{BufRead, Write};

/// Which menu the operator is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Products,
    Operations,
    Exit,
}

/// Line-driven menu loop over a [`Session`].
///
/// Reads one line per prompt from `input` and writes menus and results to
/// `output`. Recoverable errors are printed and the current menu is shown
/// again; anything else ends [`App::run`].
pub struct App<'s, R, W> {
    session: &'s mut Session,
    input: R,
    output: W,
    screen: Screen,
}

impl<'s, R: BufRead, W: Write> App<'s, R, W> {
    pub fn new(session: &'s mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
            screen: Screen::Main,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Runs until the operator picks Exit from the main menu. Both files are
    /// saved on the way out.
    pub fn run(&mut self) -> Result<()> {
        while self.screen != Screen::Exit {
            self.screen = self.step()?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Screen> {
        ui::draw_menu(&mut self.output, self.screen)?;
        let choice = self.prompt("Enter choice: ")?;

        let outcome = match self.screen {
            Screen::Main => self.main_menu(&choice),
            Screen::Products => self.product_menu(&choice),
            Screen::Operations => self.operations_menu(&choice),
            Screen::Exit => Ok(Screen::Exit),
        };

        match outcome {
            Ok(next) => Ok(next),
            Err(err) if err.is_recoverable() => {
                debug!("recovered from {:?}", err);
                writeln!(self.output, "{}", ui::error_message(&err))?;
                Ok(self.screen)
            }
            Err(err) => Err(err),
        }
    }

    fn main_menu(&mut self, choice: &str) -> Result<Screen> {
        match choice {
            "1" => Ok(Screen::Products),
            "2" => Ok(Screen::Operations),
            "3" => {
                ui::draw_transactions(&mut self.output, self.session.transactions())?;
                Ok(Screen::Main)
            }
            "4" => {
                self.session.save()?;
                writeln!(self.output, "Data saved. Exiting program.")?;
                self.output.flush()?;
                Ok(Screen::Exit)
            }
            _ => self.invalid_choice(),
        }
    }

    fn product_menu(&mut self, choice: &str) -> Result<Screen> {
        match choice {
            "1" => self.add_product()?,
            "2" => ui::draw_products(&mut self.output, self.session.products())?,
            "3" => self.update_product()?,
            "4" => self.delete_product()?,
            "5" => return Ok(Screen::Main),
            _ => return self.invalid_choice(),
        }
        Ok(Screen::Products)
    }

    fn operations_menu(&mut self, choice: &str) -> Result<Screen> {
        match choice {
            "1" => self.add_stock()?,
            "2" => self.remove_stock()?,
            "3" => ui::draw_stock_levels(&mut self.output, self.session.stock_levels())?,
            "4" => return Ok(Screen::Main),
            _ => return self.invalid_choice(),
        }
        Ok(Screen::Operations)
    }

    fn invalid_choice(&mut self) -> Result<Screen> {
        writeln!(self.output, "Invalid choice. Try again.")?;
        Ok(self.screen)
    }

    fn add_product(&mut self) -> Result<()> {
        // Cap and duplicate checks happen before the operator types the rest.
        if self.session.catalog().is_full() {
            return Err(InventoryError::CatalogFull(MAX_PRODUCTS));
        }
        let id = self.prompt("Enter product ID: ")?;
        if self.session.catalog().contains(&id) {
            return Err(InventoryError::ProductExists(id));
        }
        let name = self.prompt("Enter product name: ")?;
        let price = parse_price(&self.prompt("Enter price: ")?)?;
        let quantity = parse_quantity(&self.prompt("Enter initial quantity: ")?)?;

        self.session.add_product(&id, name.as_str(), price, quantity)?;
        writeln!(self.output, "Product '{}' added.", name)?;
        Ok(())
    }

    fn update_product(&mut self) -> Result<()> {
        let id = self.prompt("Enter product ID to update: ")?;
        if !self.session.catalog().contains(&id) {
            return Err(InventoryError::ProductNotFound(id));
        }
        let name = self.prompt("Enter new name (leave blank to keep current): ")?;
        let price = self.prompt("Enter new price (leave blank to keep current): ")?;
        let quantity = self.prompt("Enter new quantity (leave blank to keep current): ")?;

        let patch = ProductPatch::from_input(&name, &price, &quantity)?;
        self.session.update_product(&id, patch)?;
        writeln!(self.output, "Product updated.")?;
        Ok(())
    }

    fn delete_product(&mut self) -> Result<()> {
        let id = self.prompt("Enter product ID to delete: ")?;
        self.session.delete_product(&id)?;
        writeln!(self.output, "Product deleted.")?;
        Ok(())
    }

    fn add_stock(&mut self) -> Result<()> {
        let id = self.prompt("Enter product ID: ")?;
        if !self.session.catalog().contains(&id) {
            return Err(InventoryError::ProductNotFound(id));
        }
        let quantity = parse_movement(&self.prompt("Enter quantity to add: ")?)?;

        self.session.add_stock(&id, quantity)?;
        writeln!(self.output, "Stock added.")?;
        Ok(())
    }

    fn remove_stock(&mut self) -> Result<()> {
        let id = self.prompt("Enter product ID: ")?;
        if !self.session.catalog().contains(&id) {
            return Err(InventoryError::ProductNotFound(id));
        }
        let quantity = parse_movement(&self.prompt("Enter quantity to remove: ")?)?;

        self.session.remove_stock(&id, quantity)?;
        writeln!(self.output, "Stock removed.")?;
        Ok(())
    }

    /// Writes `label`, then reads one line without its line ending.
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            warn!("input closed at prompt {:?}", label.trim_end());
            return Err(InventoryError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
