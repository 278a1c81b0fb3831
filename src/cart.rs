//! Cart and Collection List
//!
//! One implementation backs both lists. Every mutation re-reads the persisted
//! list, applies the change, writes the whole list back and notifies the
//! subscribed observers, so independently mounted components never act on a
//! stale copy.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::CART_CAPACITY;
use crate::error::StorageError;
use crate::models::{Product, SelectionEntry};
use crate::storage::{keys, read_json, write_json, KeyValueStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Cart,
    /// "Request collection" list, uncapped
    Collection,
}

impl ListKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            ListKind::Cart => keys::CART_ITEMS,
            ListKind::Collection => keys::COLLECT_ITEMS,
        }
    }

    pub fn capacity(self) -> Option<usize> {
        match self {
            ListKind::Cart => Some(CART_CAPACITY),
            ListKind::Collection => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListKind::Cart => "cart",
            ListKind::Collection => "collection list",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added { len: usize },
    AlreadyPresent,
    Full { capacity: usize },
}

/// Sent to observers after every write
#[derive(Debug, Clone, PartialEq)]
pub struct ListChanged {
    pub kind: ListKind,
    pub entries: Vec<SelectionEntry>,
}

impl ListChanged {
    /// Distinct entries, the number shown on badges
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

type Observer = Box<dyn Fn(&ListChanged)>;

pub struct SelectionList<S> {
    storage: S,
    kind: ListKind,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> SelectionList<S> {
    pub fn new(storage: S, kind: ListKind) -> Self {
        Self { storage, kind, observers: Vec::new() }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&ListChanged) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn with_observer(mut self, observer: impl Fn(&ListChanged) + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    /// Latest persisted entries. Corrupt storage reads as empty and duplicate
    /// ids keep their first entry.
    pub fn entries(&self) -> Vec<SelectionEntry> {
        let mut entries: Vec<SelectionEntry> = read_json(&self.storage, self.kind.storage_key()).unwrap_or_default();
        let mut seen = HashSet::new();
        entries.retain(|entry| seen.insert(entry.id));
        entries
    }

    fn commit(&self, entries: Vec<SelectionEntry>) -> Result<(), StorageError> {
        write_json(&self.storage, self.kind.storage_key(), &entries)?;
        let change = ListChanged { kind: self.kind, entries };
        log::debug!("[{}] now holds {} entries", self.kind.label(), change.len());
        for observer in &self.observers {
            observer(&change);
        }
        Ok(())
    }

    pub fn add(&self, product: &Product, now: DateTime<Utc>) -> Result<AddOutcome, StorageError> {
        let mut entries = self.entries();
        if entries.iter().any(|entry| entry.id == product.id) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        if let Some(capacity) = self.kind.capacity() {
            if entries.len() >= capacity {
                return Ok(AddOutcome::Full { capacity });
            }
        }
        entries.push(SelectionEntry::from_product(product, now));
        let len = entries.len();
        self.commit(entries)?;
        Ok(AddOutcome::Added { len })
    }

    /// Returns false when the id was not in the list
    pub fn remove(&self, id: i64) -> Result<bool, StorageError> {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.commit(entries)?;
        Ok(true)
    }

    /// A quantity below 1 removes the entry
    pub fn update_quantity(&self, id: i64, quantity: i64) -> Result<(), StorageError> {
        if quantity < 1 {
            self.remove(id)?;
            return Ok(());
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut entries = self.entries();
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            return Ok(());
        };
        entry.quantity = quantity;
        self.commit(entries)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.commit(Vec::new())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries().iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn total_price(&self) -> f64 {
        total_price(&self.entries())
    }

    pub fn count(&self) -> u32 {
        total_quantity(&self.entries())
    }
}

/// Sum of cost × quantity
pub fn total_price(entries: &[SelectionEntry]) -> f64 {
    entries.iter().map(SelectionEntry::subtotal).sum()
}

/// Sum of quantities
pub fn total_quantity(entries: &[SelectionEntry]) -> u32 {
    entries.iter().fold(0u32, |acc, entry| acc.saturating_add(entry.quantity))
}

/// Buyer "request collection": put the product on the collection list and
/// in the cart. The cart keeps its own duplicate and capacity rules.
pub fn request_collection<A, B>(
    collection: &SelectionList<A>,
    cart: &SelectionList<B>,
    product: &Product,
    now: DateTime<Utc>,
) -> Result<(AddOutcome, AddOutcome), StorageError>
where
    A: KeyValueStore,
    B: KeyValueStore,
{
    let collected = collection.add(product, now)?;
    let carted = cart.add(product, now)?;
    Ok((collected, carted))
}

/// Fold the old `cart` key into `cartItems` and drop it.
///
/// Entries already present keep their current quantity; anything past the
/// cart capacity is discarded. Returns the number of entries moved over.
pub fn migrate_legacy_cart<S: KeyValueStore>(storage: &S) -> Result<usize, StorageError> {
    let Some(legacy) = read_json::<Vec<SelectionEntry>>(storage, keys::LEGACY_CART) else {
        storage.remove(keys::LEGACY_CART)?;
        return Ok(0);
    };
    let cart = SelectionList::new(storage, ListKind::Cart);
    let mut entries = cart.entries();
    let mut moved = 0;
    for entry in legacy {
        if entries.len() >= CART_CAPACITY {
            break;
        }
        if entries.iter().all(|existing| existing.id != entry.id) {
            entries.push(entry);
            moved += 1;
        }
    }
    if moved > 0 {
        cart.commit(entries)?;
    }
    storage.remove(keys::LEGACY_CART)?;
    log::info!("[cart] migrated {moved} entries from the legacy cart");
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product(id: i64, cost: f64) -> Product {
        Product {
            id,
            name: format!("Donation {}", id),
            category: "Vegetables".to_string(),
            description: None,
            cost,
            timer: None,
            created_at: None,
            image: None,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_cart_capacity_is_ten() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        for id in 1..=10 {
            assert_eq!(cart.add(&product(id, 1.0), now()).unwrap(), AddOutcome::Added { len: id as usize });
        }
        assert_eq!(cart.add(&product(11, 1.0), now()).unwrap(), AddOutcome::Full { capacity: 10 });
        assert_eq!(ListKind::Cart.capacity(), Some(CART_CAPACITY));
        assert_eq!(cart.len(), 10);
        assert!(!cart.contains(11));
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        cart.add(&product(1, 2.0), now()).unwrap();
        assert_eq!(cart.add(&product(1, 2.0), now()).unwrap(), AddOutcome::AlreadyPresent);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_then_add_resets_quantity() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        cart.add(&product(5, 2.0), now()).unwrap();
        cart.update_quantity(5, 4).unwrap();
        assert_eq!(cart.count(), 4);
        assert!(cart.remove(5).unwrap());
        cart.add(&product(5, 2.0), now()).unwrap();
        let entries = cart.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 1);
    }

    #[test]
    fn test_totals() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        cart.add(&product(1, 2.5), now()).unwrap();
        cart.add(&product(2, 4.0), now()).unwrap();
        cart.add(&product(3, 1.0), now()).unwrap();
        cart.update_quantity(1, 2).unwrap();
        cart.update_quantity(3, 5).unwrap();
        assert_eq!(cart.total_price(), 2.5 * 2.0 + 4.0 + 5.0);
        assert_eq!(cart.count(), 8);
        assert_eq!(total_quantity(&cart.entries()), 8);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        cart.add(&product(1, 1.0), now()).unwrap();
        cart.update_quantity(1, 0).unwrap();
        assert_eq!(cart.len(), 0);
        // Unknown ids are ignored
        cart.update_quantity(42, 3).unwrap();
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = MemoryStore::new();
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let cart = SelectionList::new(&store, ListKind::Cart).with_observer(move |_| *counter.borrow_mut() += 1);
        assert!(!cart.remove(9).unwrap());
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_observers_see_every_write() {
        let store = MemoryStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let cart = SelectionList::new(&store, ListKind::Cart).with_observer(move |change| log.borrow_mut().push(change.len()));
        cart.add(&product(1, 1.0), now()).unwrap();
        cart.add(&product(2, 1.0), now()).unwrap();
        cart.remove(1).unwrap();
        cart.clear().unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);
    }

    #[test]
    fn test_two_handles_share_persisted_state() {
        let store = MemoryStore::new();
        let badge = SelectionList::new(&store, ListKind::Cart);
        let card = SelectionList::new(&store, ListKind::Cart);
        card.add(&product(3, 1.0), now()).unwrap();
        assert!(badge.contains(3));
        badge.remove(3).unwrap();
        assert!(!card.contains(3));
    }

    #[test]
    fn test_corrupt_storage_reads_empty() {
        let store = MemoryStore::new();
        store.set(keys::CART_ITEMS, "{not json").unwrap();
        let cart = SelectionList::new(&store, ListKind::Cart);
        assert!(cart.entries().is_empty());
        assert_eq!(cart.add(&product(1, 1.0), now()).unwrap(), AddOutcome::Added { len: 1 });
    }

    #[test]
    fn test_collection_is_uncapped() {
        let store = MemoryStore::new();
        let collection = SelectionList::new(&store, ListKind::Collection);
        for id in 1..=12 {
            collection.add(&product(id, 1.0), now()).unwrap();
        }
        assert_eq!(collection.len(), 12);
        assert_eq!(store.get(keys::CART_ITEMS).unwrap(), None);
    }

    #[test]
    fn test_request_collection_adds_to_both() {
        let store = MemoryStore::new();
        let collection = SelectionList::new(&store, ListKind::Collection);
        let cart = SelectionList::new(&store, ListKind::Cart);
        let (collected, carted) = request_collection(&collection, &cart, &product(8, 3.0), now()).unwrap();
        assert_eq!(collected, AddOutcome::Added { len: 1 });
        assert_eq!(carted, AddOutcome::Added { len: 1 });

        let (collected, carted) = request_collection(&collection, &cart, &product(8, 3.0), now()).unwrap();
        assert_eq!(collected, AddOutcome::AlreadyPresent);
        assert_eq!(carted, AddOutcome::AlreadyPresent);
    }

    #[test]
    fn test_migrate_legacy_cart() {
        let store = MemoryStore::new();
        let cart = SelectionList::new(&store, ListKind::Cart);
        cart.add(&product(1, 1.0), now()).unwrap();
        let legacy = vec![
            SelectionEntry { quantity: 3, ..SelectionEntry::from_product(&product(1, 1.0), now()) },
            SelectionEntry { quantity: 2, ..SelectionEntry::from_product(&product(2, 1.0), now()) },
        ];
        write_json(&store, keys::LEGACY_CART, &legacy).unwrap();

        assert_eq!(migrate_legacy_cart(&store).unwrap(), 1);
        let entries = cart.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quantity, 1);
        assert_eq!(entries[1].quantity, 2);
        assert_eq!(store.get(keys::LEGACY_CART).unwrap(), None);
    }
}
