use crate::core::{Operation, Transaction};
use serde::{Deserialize, Serialize};

/// Append-only record of stock movements. Entries cannot be edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a movement stamped with the current local time.
    pub fn record(&mut self, product_id: &str, quantity: u64, operation: Operation) -> &Transaction {
        self.append(Transaction::now(product_id, quantity, operation))
    }

    pub fn append(&mut self, entry: Transaction) -> &Transaction {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_in_order() {
        let mut log = TransactionLog::new();
        log.record("1", 50, Operation::Add);
        log.record("1", 20, Operation::Remove);

        let ops: Vec<(u64, Operation)> = log.entries().map(|t| (t.quantity, t.operation)).collect();
        assert_eq!(ops, vec![(50, Operation::Add), (20, Operation::Remove)]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_entries_load_verbatim() {
        let json = r#"[
            {"date": "2024-01-02 09:00:00.000001", "product_id": "gone", "quantity": 4, "operation": "Remove"}
        ]"#;

        let log: TransactionLog = serde_json::from_str(json).unwrap();

        let entry = log.last().unwrap();
        assert_eq!(entry.date, "2024-01-02 09:00:00.000001");
        assert_eq!(entry.product_id, "gone");
        assert_eq!(entry.operation, Operation::Remove);
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let json = r#"[{"date": "x", "product_id": "1", "quantity": 1, "operation": "Move"}]"#;
        assert!(serde_json::from_str::<TransactionLog>(json).is_err());
    }
}
