//! One run of the tracker: owns the catalog and the transaction log between load and save.

use crate::config::SessionConfig;
use crate::core::{InventoryError, Operation, Product, ProductPatch, Result, StockLevel, Transaction};
use crate::storage::{Catalog, JsonFile, TransactionLog};
use log::{debug, info};

pub struct Session {
    catalog_file: JsonFile<Catalog>,
    log_file: JsonFile<TransactionLog>,
    catalog: Catalog,
    log: TransactionLog,
}

impl Session {
    /// Loads both files. A missing catalog file yields the starter catalog,
    /// a missing log file an empty log.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let catalog_file: JsonFile<Catalog> = JsonFile::new(&config.data_file);
        let log_file: JsonFile<TransactionLog> = JsonFile::new(&config.log_file);

        let catalog = catalog_file.load_or(Catalog::starter())?;
        let log = log_file.load_or(TransactionLog::new())?;
        info!(
            "session opened with {} products and {} transactions",
            catalog.len(),
            log.len()
        );

        Ok(Self {
            catalog_file,
            log_file,
            catalog,
            log,
        })
    }

    /// A session over explicit state. Nothing is read from disk.
    pub fn with_state(config: &SessionConfig, catalog: Catalog, log: TransactionLog) -> Self {
        Self {
            catalog_file: JsonFile::new(&config.data_file),
            log_file: JsonFile::new(&config.log_file),
            catalog,
            log,
        }
    }

    /// Writes the catalog, then the log. The pair is not atomic as a whole.
    pub fn save(&self) -> Result<()> {
        self.catalog_file.save(&self.catalog)?;
        self.log_file.save(&self.log)?;
        info!(
            "saved {} products to '{}' and {} transactions to '{}'",
            self.catalog.len(),
            self.catalog_file.path().display(),
            self.log.len(),
            self.log_file.path().display()
        );
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn add_product(
        &mut self,
        id: &str,
        name: impl Into<String>,
        price: f64,
        quantity: u64,
    ) -> Result<()> {
        self.catalog.add(id, Product::new(name, price, quantity))?;
        debug!("added product '{}'", id);
        Ok(())
    }

    pub fn products(&self) -> impl Iterator<Item = (&str, &Product)> + '_ {
        self.catalog.view()
    }

    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> Result<&Product> {
        debug!("updating product '{}' with {:?}", id, patch);
        self.catalog.update(id, patch)
    }

    pub fn delete_product(&mut self, id: &str) -> Result<Product> {
        let removed = self.catalog.delete(id)?;
        debug!("deleted product '{}'", id);
        Ok(removed)
    }

    /// Increases stock and logs an `Add`. Returns the new quantity.
    pub fn add_stock(&mut self, id: &str, quantity: u64) -> Result<u64> {
        ensure_movement(quantity)?;
        let product = self.catalog.get_mut(id)?;
        let updated = product.quantity.checked_add(quantity).ok_or_else(|| {
            InventoryError::InvalidInput(format!(
                "adding {} to product '{}' overflows its quantity",
                quantity, id
            ))
        })?;
        product.quantity = updated;
        self.log.record(id, quantity, Operation::Add);
        debug!("product '{}' stock +{} -> {}", id, quantity, updated);
        Ok(updated)
    }

    /// Decreases stock and logs a `Remove`. Never partially fulfils: if the
    /// product holds less than `quantity`, nothing changes.
    pub fn remove_stock(&mut self, id: &str, quantity: u64) -> Result<u64> {
        ensure_movement(quantity)?;
        let product = self.catalog.get_mut(id)?;
        if quantity > product.quantity {
            return Err(InventoryError::InsufficientStock {
                product_id: id.to_string(),
                requested: quantity,
                available: product.quantity,
            });
        }
        product.quantity -= quantity;
        let remaining = product.quantity;
        self.log.record(id, quantity, Operation::Remove);
        debug!("product '{}' stock -{} -> {}", id, quantity, remaining);
        Ok(remaining)
    }

    pub fn stock_levels(&self) -> impl Iterator<Item = StockLevel<'_>> + '_ {
        self.catalog.stock_levels()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.log.entries()
    }
}

fn ensure_movement(quantity: u64) -> Result<()> {
    if quantity == 0 {
        return Err(InventoryError::InvalidInput(
            "quantity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_session() -> Session {
        Session::with_state(&SessionConfig::default(), Catalog::new(), TransactionLog::new())
    }

    #[test]
    fn test_stock_scenario() {
        let mut session = empty_session();

        session.add_product("1", "Apple", 0.5, 100).unwrap();
        assert_eq!(
            session.catalog().get("1"),
            Some(&Product::new("Apple", 0.5, 100))
        );

        assert_eq!(session.add_stock("1", 50).unwrap(), 150);
        assert_eq!(session.log().len(), 1);
        let first = session.log().last().unwrap();
        assert_eq!((first.quantity, first.operation), (50, Operation::Add));

        let err = session.remove_stock("1", 200).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientStock {
                requested: 200,
                available: 150,
                ..
            }
        ));
        assert_eq!(session.catalog().get("1").unwrap().quantity, 150);
        assert_eq!(session.log().len(), 1);

        assert_eq!(session.remove_stock("1", 150).unwrap(), 0);
        assert_eq!(session.log().len(), 2);
        let last = session.log().last().unwrap();
        assert_eq!((last.quantity, last.operation), (150, Operation::Remove));
    }

    #[test]
    fn test_stock_ops_on_missing_product() {
        let mut session = empty_session();

        assert!(matches!(
            session.add_stock("nope", 1),
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(matches!(
            session.remove_stock("nope", 1),
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_zero_movement_is_rejected() {
        let mut session = Session::with_state(
            &SessionConfig::default(),
            Catalog::starter(),
            TransactionLog::new(),
        );

        assert!(matches!(
            session.add_stock("1", 0),
            Err(InventoryError::InvalidInput(_))
        ));
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_add_stock_overflow_leaves_quantity() {
        let mut session = empty_session();
        session.add_product("1", "Sand", 0.01, u64::MAX - 1).unwrap();

        assert!(session.add_stock("1", 5).is_err());
        assert_eq!(session.catalog().get("1").unwrap().quantity, u64::MAX - 1);
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_removing_exact_stock_reaches_zero() {
        let mut session = Session::with_state(
            &SessionConfig::default(),
            Catalog::starter(),
            TransactionLog::new(),
        );

        assert_eq!(session.remove_stock("5", 40).unwrap(), 0);
        let levels: Vec<u64> = session.stock_levels().map(|s| s.quantity).collect();
        assert_eq!(levels, vec![100, 150, 120, 50, 0]);
    }

    #[test]
    fn test_log_entries_survive_product_deletion() {
        let mut session = Session::with_state(
            &SessionConfig::default(),
            Catalog::starter(),
            TransactionLog::new(),
        );
        session.add_stock("2", 10).unwrap();
        session.delete_product("2").unwrap();

        let ids: Vec<&str> = session.transactions().map(|t| t.product_id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }
}
