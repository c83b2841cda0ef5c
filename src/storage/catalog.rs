use crate::core::{InventoryError, Product, ProductPatch, Result, StockLevel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hard cap on the number of products the catalog will hold.
pub const MAX_PRODUCTS: usize = 5;

/// Product records keyed by id, in insertion order.
///
/// Serializes as a plain JSON object so the on-disk file is
/// `{ "<id>": { "name": .., "price": .., "quantity": .. }, .. }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: IndexMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five starter products used when no catalog file exists yet.
    pub fn starter() -> Self {
        let mut products = IndexMap::new();
        products.insert("1".to_string(), Product::new("Apple", 0.5, 100));
        products.insert("2".to_string(), Product::new("Banana", 0.3, 150));
        products.insert("3".to_string(), Product::new("Orange", 0.7, 120));
        products.insert("4".to_string(), Product::new("Milk", 1.2, 50));
        products.insert("5".to_string(), Product::new("Bread", 1.0, 40));
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.products.len() >= MAX_PRODUCTS
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Result<&mut Product> {
        self.products
            .get_mut(id)
            .ok_or_else(|| InventoryError::ProductNotFound(id.to_string()))
    }

    pub fn add(&mut self, id: impl Into<String>, product: Product) -> Result<()> {
        if self.is_full() {
            return Err(InventoryError::CatalogFull(MAX_PRODUCTS));
        }
        let id = id.into();
        if self.products.contains_key(&id) {
            return Err(InventoryError::ProductExists(id));
        }
        self.products.insert(id, product);
        Ok(())
    }

    /// Iterates `(id, product)` pairs in catalog order. Call again to restart.
    pub fn view(&self) -> impl Iterator<Item = (&str, &Product)> + '_ {
        self.products.iter().map(|(id, product)| (id.as_str(), product))
    }

    pub fn stock_levels(&self) -> impl Iterator<Item = StockLevel<'_>> + '_ {
        self.view().map(|(id, product)| StockLevel {
            id,
            name: &product.name,
            quantity: product.quantity,
        })
    }

    pub fn update(&mut self, id: &str, patch: ProductPatch) -> Result<&Product> {
        let product = self.get_mut(id)?;
        patch.apply(product);
        Ok(product)
    }

    /// Removes a product. The remaining entries keep their relative order.
    pub fn delete(&mut self, id: &str) -> Result<Product> {
        self.products
            .shift_remove(id)
            .ok_or_else(|| InventoryError::ProductNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_catalog() {
        let catalog = Catalog::starter();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.is_full());
        assert_eq!(catalog.get("4"), Some(&Product::new("Milk", 1.2, 50)));
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut catalog = Catalog::new();
        catalog.add("1", Product::new("Apple", 0.5, 100)).unwrap();

        let err = catalog.add("1", Product::new("Pear", 0.9, 3)).unwrap_err();

        assert!(matches!(err, InventoryError::ProductExists(id) if id == "1"));
        assert_eq!(catalog.get("1").unwrap().name, "Apple");
    }

    #[test]
    fn test_sixth_add_is_rejected() {
        let mut catalog = Catalog::new();
        for i in 1..=5 {
            catalog
                .add(i.to_string(), Product::new(format!("Item {}", i), 1.0, i))
                .unwrap();
        }

        let err = catalog.add("6", Product::new("Extra", 1.0, 1)).unwrap_err();

        assert!(matches!(err, InventoryError::CatalogFull(MAX_PRODUCTS)));
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.contains("6"));
    }

    #[test]
    fn test_full_catalog_reports_limit_before_duplicate() {
        let mut catalog = Catalog::starter();
        let err = catalog.add("1", Product::new("Apple", 0.5, 1)).unwrap_err();
        assert!(matches!(err, InventoryError::CatalogFull(_)));
    }

    #[test]
    fn test_view_keeps_insertion_order_and_restarts() {
        let mut catalog = Catalog::new();
        catalog.add("z", Product::new("Zucchini", 2.0, 1)).unwrap();
        catalog.add("a", Product::new("Avocado", 1.5, 2)).unwrap();

        let first: Vec<&str> = catalog.view().map(|(id, _)| id).collect();
        let second: Vec<&str> = catalog.view().map(|(id, _)| id).collect();

        assert_eq!(first, vec!["z", "a"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_missing_product() {
        let mut catalog = Catalog::new();
        let err = catalog.update("42", ProductPatch::default()).unwrap_err();
        assert!(matches!(err, InventoryError::ProductNotFound(_)));
    }

    #[test]
    fn test_update_overwrites_given_fields_only() {
        let mut catalog = Catalog::starter();
        let patch = ProductPatch {
            name: Some("Whole Milk".to_string()),
            price: None,
            quantity: Some(75),
        };

        let updated = catalog.update("4", patch).unwrap();

        assert_eq!(updated, &Product::new("Whole Milk", 1.2, 75));
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut catalog = Catalog::starter();

        let removed = catalog.delete("2").unwrap();
        assert_eq!(removed.name, "Banana");

        let ids: Vec<&str> = catalog.view().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
        assert!(matches!(
            catalog.delete("2"),
            Err(InventoryError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_stock_levels_projection() {
        let catalog = Catalog::starter();
        let first = catalog.stock_levels().next().unwrap();
        assert_eq!(
            first,
            StockLevel {
                id: "1",
                name: "Apple",
                quantity: 100
            }
        );
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut catalog = Catalog::new();
        catalog.add("1", Product::new("Apple", 0.5, 100)).unwrap();

        let json = serde_json::to_value(&catalog).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"1": {"name": "Apple", "price": 0.5, "quantity": 100}})
        );
    }
}
