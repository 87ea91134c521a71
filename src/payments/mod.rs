pub mod waterfall;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BalanceError, Result};
use crate::types::Collection;

pub use waterfall::{Allocation, BalanceComponent, Outstanding, PaymentWaterfall};

/// collections of one loan in ascending date order
///
/// The ledger stores collections newest first. The engine walks them oldest
/// first, so the order is fixed when the history is built and never again.
/// Deserializing goes through [`CollectionHistory::from_ascending`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Collection>", into = "Vec<Collection>")]
pub struct CollectionHistory {
    collections: Vec<Collection>,
}

impl CollectionHistory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// build from the ledger's newest-first order
    ///
    /// Entries sharing a date keep ledger semantics: the one listed later in
    /// the ledger is applied first.
    pub fn from_ledger_order<I>(newest_first: I) -> Result<Self>
    where
        I: IntoIterator<Item = Collection>,
    {
        let mut collections: Vec<Collection> = newest_first.into_iter().collect();
        validate_amounts(&collections)?;

        collections.reverse();
        collections.sort_by_key(|c| c.date);

        Ok(Self { collections })
    }

    /// build from a sequence that must already be oldest first
    pub fn from_ascending<I>(oldest_first: I) -> Result<Self>
    where
        I: IntoIterator<Item = Collection>,
    {
        let collections: Vec<Collection> = oldest_first.into_iter().collect();
        validate_amounts(&collections)?;

        if let Some(pair) = collections.windows(2).find(|w| w[0].date > w[1].date) {
            return Err(BalanceError::CollectionsOutOfOrder {
                later: pair[0].date,
                earlier: pair[1].date,
            });
        }

        Ok(Self { collections })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.collections.iter()
    }

    pub fn as_slice(&self) -> &[Collection] {
        &self.collections
    }

    /// the oldest collection
    pub fn first(&self) -> Option<&Collection> {
        self.collections.first()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl<'a> IntoIterator for &'a CollectionHistory {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Collection>> for CollectionHistory {
    type Error = BalanceError;

    fn try_from(oldest_first: Vec<Collection>) -> Result<Self> {
        Self::from_ascending(oldest_first)
    }
}

impl From<CollectionHistory> for Vec<Collection> {
    fn from(history: CollectionHistory) -> Self {
        history.collections
    }
}

fn validate_amounts(collections: &[Collection]) -> Result<()> {
    for c in collections {
        if c.amount.is_negative() {
            return Err(BalanceError::NegativeCollection {
                amount: c.amount,
                date: c.date,
            });
        }
        if c.amount > Money::MAX_AMOUNT {
            return Err(BalanceError::AmountTooLarge {
                name: "collected amount",
                amount: c.amount,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn collection(amount: i64, d: u32) -> Collection {
        Collection::new(Money::from_major(amount), date(d))
    }

    #[test]
    fn test_ledger_order_is_reversed() {
        let history = CollectionHistory::from_ledger_order(vec![
            collection(300, 20),
            collection(200, 10),
            collection(100, 5),
        ])
        .unwrap();

        let dates: Vec<_> = history.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(5), date(10), date(20)]);
        assert_eq!(history.first().map(|c| c.date), Some(date(5)));
    }

    #[test]
    fn test_ledger_order_sorts_misplaced_entries() {
        let history = CollectionHistory::from_ledger_order(vec![
            collection(200, 10),
            collection(300, 20),
            collection(100, 5),
        ])
        .unwrap();

        let dates: Vec<_> = history.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(5), date(10), date(20)]);
    }

    #[test]
    fn test_same_day_entries_apply_oldest_record_first() {
        let history = CollectionHistory::from_ledger_order(vec![
            collection(2, 10),
            collection(1, 10),
        ])
        .unwrap();

        let amounts: Vec<_> = history.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![Money::from_major(1), Money::from_major(2)]);
    }

    #[test]
    fn test_ascending_rejects_out_of_order() {
        let err = CollectionHistory::from_ascending(vec![
            collection(100, 5),
            collection(300, 20),
            collection(200, 10),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            BalanceError::CollectionsOutOfOrder { later: date(20), earlier: date(10) }
        );
    }

    #[test]
    fn test_ascending_accepts_ties() {
        let history = CollectionHistory::from_ascending(vec![
            collection(100, 5),
            collection(50, 5),
        ])
        .unwrap();

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_negative_collection_rejected() {
        let err = CollectionHistory::from_ledger_order(vec![collection(-10, 7)]).unwrap_err();

        assert!(matches!(err, BalanceError::NegativeCollection { .. }));
    }

    #[test]
    fn test_oversized_collection_rejected() {
        let huge = Collection::new(Money::MAX_AMOUNT + Money::from_minor(1, 2), date(7));
        let err = CollectionHistory::from_ascending(vec![huge]).unwrap_err();

        assert!(matches!(err, BalanceError::AmountTooLarge { .. }));
    }

    #[test]
    fn test_deserialize_keeps_ascending_order() {
        let json = r#"[
            {"amount": "3000", "date": "2024-03-05"},
            {"amount": "1000", "date": "2024-03-20"}
        ]"#;
        let history: CollectionHistory = serde_json::from_str(json).unwrap();

        assert_eq!(history.first().map(|c| c.date), Some(date(5)));
        assert_eq!(
            serde_json::to_string(&history).unwrap(),
            serde_json::to_string(history.as_slice()).unwrap()
        );
    }

    #[test]
    fn test_deserialize_rejects_unsorted_collections() {
        let json = r#"[
            {"amount": "1000", "date": "2024-03-20"},
            {"amount": "3000", "date": "2024-03-05"}
        ]"#;
        let err = serde_json::from_str::<CollectionHistory>(json).unwrap_err();

        assert!(err.to_string().contains("collections out of order"));
    }

    #[test]
    fn test_deserialize_rejects_negative_collection() {
        let json = r#"[{"amount": "-5", "date": "2024-03-05"}]"#;
        let err = serde_json::from_str::<CollectionHistory>(json).unwrap_err();

        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_empty_history() {
        let history = CollectionHistory::empty();
        assert!(history.is_empty());
        assert!(history.first().is_none());
    }
}
