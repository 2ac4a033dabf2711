//! Catalog facade.
//!
//! Ties the ordered index to its external collaborators: the item store it
//! is rebuilt from and writes through to, and the caller's role, which
//! gates every mutation.
//!
//! # Invariants
//!
//! - After `open`, the index holds the items returned by
//!   `ItemStore::load_all`, minus identical-key collapses and items whose
//!   title was already taken.
//! - No two indexed items share an id, so writing one item through to the
//!   store never overwrites another item's record.
//! - Every mutation is applied to the index first and forwarded to the store
//!   only if the index accepted it.
//! - A store failure after an index mutation is reported to the caller; the
//!   index keeps the new state.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::finder::{self, Disambiguation, SearchField};
use crate::index::{IndexError, Insertion, OrderedIndex, Traversal, TraversalOrder};
use crate::store::{ItemStore, StoreError};
use crate::types::{Item, ItemId};

/// Role of the caller issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Whether this role may add, edit or delete items.
    #[must_use]
    pub const fn can_mutate(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A catalog shared between threads.
///
/// Reads take the read lock, mutations take the write lock.
pub type SharedCatalog<S> = Arc<RwLock<Catalog<S>>>;

/// In-memory catalog backed by an item store.
pub struct Catalog<S: ItemStore> {
    index: OrderedIndex,
    store: S,
}

impl<S: ItemStore> Catalog<S> {
    /// Rebuild the index from everything in `store`.
    ///
    /// A stored item whose title is already indexed under a different author
    /// or genre is logged and skipped; the first one loaded wins. The store
    /// itself is left as is.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot be read.
    pub fn open(store: S) -> Result<Self, CatalogError> {
        let items = store.load_all()?;
        let loaded = items.len();
        let mut index = OrderedIndex::new();
        let mut skipped = 0usize;
        for item in items {
            let id = item.id;
            if let Err(e) = index.insert(item) {
                tracing::warn!(%id, error = %e, "skipping stored item");
                skipped += 1;
            }
        }
        tracing::info!(loaded, skipped, indexed = index.count(), "catalog opened");
        Ok(Self { index, store })
    }

    /// Wrap the catalog for shared access.
    #[must_use]
    pub fn into_shared(self) -> SharedCatalog<S> {
        Arc::new(RwLock::new(self))
    }

    #[must_use]
    pub const fn index(&self) -> &OrderedIndex {
        &self.index
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The id following the largest id in the catalog (1 when empty).
    #[must_use]
    pub fn next_id(&self) -> ItemId {
        self.index
            .in_order()
            .map(|item| item.id)
            .max()
            .map_or(ItemId(1), ItemId::next)
    }

    /// Add an item, or overwrite the payload of an item with the same key.
    pub fn add(&mut self, role: Role, item: Item) -> Result<Insertion, CatalogError> {
        Self::authorize(role, "add")?;
        self.check_id(item.id, &item.title)?;
        let stored = item.clone();
        let outcome = self.index.insert(item)?;
        if let Insertion::Replaced { previous } = &outcome {
            if previous.id != stored.id {
                self.store.delete(previous.id)?;
            }
        }
        self.store.upsert(&stored)?;
        tracing::debug!(id = %stored.id, title = %stored.title, ?outcome, "item added");
        Ok(outcome)
    }

    /// Replace the item titled `old_title` with `item`.
    ///
    /// Returns the previous item.
    pub fn edit(&mut self, role: Role, old_title: &str, item: Item) -> Result<Item, CatalogError> {
        Self::authorize(role, "edit")?;
        self.check_id(item.id, old_title)?;
        let stored = item.clone();
        let previous = self
            .index
            .update(old_title, item)?
            .ok_or_else(|| CatalogError::NotFound(old_title.to_string()))?;
        if previous.id != stored.id {
            self.store.delete(previous.id)?;
        }
        self.store.upsert(&stored)?;
        tracing::debug!(old_title, title = %stored.title, id = %stored.id, "item edited");
        Ok(previous)
    }

    /// Delete the item titled `title`, returning it.
    pub fn delete(&mut self, role: Role, title: &str) -> Result<Item, CatalogError> {
        Self::authorize(role, "delete")?;
        let removed = self
            .index
            .remove(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;
        self.store.delete(removed.id)?;
        tracing::debug!(id = %removed.id, title, "item deleted");
        Ok(removed)
    }

    /// Rename an author across the catalog.
    ///
    /// Every item whose author is exactly `old` is rewritten in place and
    /// written through to the store. Returns the changed items in key order;
    /// the list is empty when no item has that author.
    pub fn rename_author(
        &mut self,
        role: Role,
        old: &str,
        new: &str,
    ) -> Result<Vec<Item>, CatalogError> {
        Self::authorize(role, "rename")?;
        let new = Self::check_name(new)?;
        let changed = self.index.rename_author(old, new);
        self.write_through(&changed)?;
        tracing::debug!(old, new, changed = changed.len(), "author renamed");
        Ok(changed)
    }

    /// Rename one genre value across the catalog.
    ///
    /// Multi-value genre fields are rewritten value by value, so renaming
    /// `Comedy` turns `"Action, Comedy"` into `"Action, <new>"`.
    /// A genre name containing a comma is rejected.
    pub fn rename_genre(
        &mut self,
        role: Role,
        old: &str,
        new: &str,
    ) -> Result<Vec<Item>, CatalogError> {
        Self::authorize(role, "rename")?;
        let new = Self::check_name(new)?;
        if new.contains(',') {
            return Err(CatalogError::InvalidName(new.to_string()));
        }
        let changed = self.index.rename_genre(old, new);
        self.write_through(&changed)?;
        tracing::debug!(old, new, changed = changed.len(), "genre renamed");
        Ok(changed)
    }

    /// Exact title lookup.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&Item> {
        self.index.search(title)
    }

    /// Case-insensitive partial lookup on one field.
    #[must_use]
    pub fn search(&self, field: SearchField, keyword: &str) -> Vec<&Item> {
        finder::search_by_field(&self.index, keyword, field)
    }

    /// Resolve a partial title to candidates, best-first.
    #[must_use]
    pub fn disambiguate(&self, keyword: &str) -> Disambiguation<'_> {
        finder::disambiguate(&self.index, keyword)
    }

    /// All items in ascending key order.
    #[must_use]
    pub fn list(&self) -> Vec<&Item> {
        self.index.get_all()
    }

    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        self.index.traverse(order)
    }

    /// Reject `id` if it belongs to an indexed item other than the one
    /// titled `replacing`.
    fn check_id(&self, id: ItemId, replacing: &str) -> Result<(), CatalogError> {
        match self
            .index
            .in_order()
            .find(|item| item.id == id && item.title != replacing)
        {
            Some(owner) => Err(CatalogError::DuplicateId {
                id,
                title: owner.title.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_name(name: &str) -> Result<&str, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidName(name.to_string()));
        }
        Ok(name)
    }

    fn write_through(&mut self, items: &[Item]) -> Result<(), CatalogError> {
        for item in items {
            self.store.upsert(item)?;
        }
        Ok(())
    }

    fn authorize(role: Role, action: &'static str) -> Result<(), CatalogError> {
        if role.can_mutate() {
            return Ok(());
        }
        tracing::warn!(?role, action, "mutation refused");
        Err(CatalogError::Unauthorized { action })
    }
}

impl<S: ItemStore> fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.index.count())
            .finish_non_exhaustive()
    }
}

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The caller's role may not perform `action`.
    Unauthorized { action: &'static str },
    /// No item has the given title.
    NotFound(String),
    /// The id already belongs to the item with this title.
    DuplicateId { id: ItemId, title: String },
    /// A rename target is blank, or is a genre containing a comma.
    InvalidName(String),
    /// The index rejected the change.
    Index(IndexError),
    /// The store failed.
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized { action } => write!(f, "not authorized to {action} items"),
            Self::NotFound(title) => write!(f, "no item titled '{title}'"),
            Self::DuplicateId { id, title } => {
                write!(f, "id {id} is already used by '{title}'")
            }
            Self::InvalidName(name) => write!(f, "invalid name '{name}'"),
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Unauthorized { .. }
            | Self::NotFound(_)
            | Self::DuplicateId { .. }
            | Self::InvalidName(_) => None,
        }
    }
}

impl From<IndexError> for CatalogError {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, sample_items};

    fn open_sample() -> Catalog<MemoryStore> {
        Catalog::open(MemoryStore::with_items(sample_items())).expect("open catalog")
    }

    #[test]
    fn test_open_rebuilds_index_from_store() {
        let catalog = open_sample();
        assert_eq!(catalog.index().count(), 10);
        let listing: Vec<&str> = catalog.list().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(listing.first(), Some(&"Attack on Titan"));
        assert_eq!(listing.last(), Some(&"Tokyo Ghoul"));
    }

    #[test]
    fn test_open_fails_when_store_unavailable() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        let err = Catalog::open(store).expect_err("offline");
        assert!(matches!(err, CatalogError::Store(_)));
    }

    #[test]
    fn test_next_id() {
        assert_eq!(open_sample().next_id(), ItemId(11));
        let empty = Catalog::open(MemoryStore::new()).expect("open");
        assert_eq!(empty.next_id(), ItemId(1));
    }

    #[test]
    fn test_add_writes_through() {
        let mut catalog = open_sample();
        let id = catalog.next_id();
        let outcome = catalog
            .add(Role::Admin, Item::new(id, "Vagabond", "Takehiko Inoue", "Drama"))
            .expect("add");
        assert_eq!(outcome, Insertion::Inserted);
        assert_eq!(catalog.find("Vagabond").map(|i| i.id), Some(id));
        assert_eq!(catalog.store().get(id).map(|i| i.title.as_str()), Some("Vagabond"));
    }

    #[test]
    fn test_add_same_key_replaces_stored_id() {
        let mut catalog = open_sample();
        catalog
            .add(Role::Admin, Item::new(42, "Bleach", "Tite Kubo", "Action"))
            .expect("add");
        assert_eq!(catalog.index().count(), 10);
        assert_eq!(catalog.find("Bleach").map(|i| i.id), Some(ItemId(42)));
        assert!(catalog.store().get(ItemId(8)).is_none());
        assert!(catalog.store().get(ItemId(42)).is_some());
    }

    #[test]
    fn test_user_cannot_mutate() {
        let mut catalog = open_sample();
        let err = catalog
            .delete(Role::User, "Bleach")
            .expect_err("unauthorized");
        assert_eq!(err, CatalogError::Unauthorized { action: "delete" });
        assert_eq!(err.to_string(), "not authorized to delete items");
        assert!(catalog.find("Bleach").is_some());

        let err = catalog
            .add(Role::User, Item::new(99, "X", "Y", "Z"))
            .expect_err("unauthorized");
        assert!(matches!(err, CatalogError::Unauthorized { .. }));
        assert!(catalog.find("X").is_none());
    }

    #[test]
    fn test_delete() {
        let mut catalog = open_sample();
        let removed = catalog.delete(Role::Admin, "Bleach").expect("delete");
        assert_eq!(removed.id, ItemId(8));
        assert!(catalog.find("Bleach").is_none());
        assert!(catalog.store().get(ItemId(8)).is_none());
        assert_eq!(
            catalog.delete(Role::Admin, "Bleach"),
            Err(CatalogError::NotFound("Bleach".to_string()))
        );
    }

    #[test]
    fn test_edit_changes_title() {
        let mut catalog = open_sample();
        let previous = catalog
            .edit(
                Role::Admin,
                "Naruto",
                Item::new(1, "Boruto", "Masashi Kishimoto", "Action"),
            )
            .expect("edit");
        assert_eq!(previous.title, "Naruto");
        assert!(catalog.find("Naruto").is_none());
        assert_eq!(catalog.find("Boruto").map(|i| i.id), Some(ItemId(1)));
        assert_eq!(
            catalog.store().get(ItemId(1)).map(|i| i.title.as_str()),
            Some("Boruto")
        );
        assert_eq!(catalog.index().count(), 10);
    }

    #[test]
    fn test_edit_missing_and_duplicate() {
        let mut catalog = open_sample();
        let err = catalog
            .edit(Role::Admin, "Missing", Item::new(1, "A", "B", "C"))
            .expect_err("missing");
        assert_eq!(err, CatalogError::NotFound("Missing".to_string()));

        let err = catalog
            .edit(Role::Admin, "Naruto", Item::new(1, "Bleach", "B", "C"))
            .expect_err("duplicate");
        assert!(matches!(err, CatalogError::Index(IndexError::DuplicateTitle { .. })));
        assert!(catalog.find("Naruto").is_some());
    }

    #[test]
    fn test_edit_rejects_id_of_another_item() {
        let mut catalog = open_sample();
        let err = catalog
            .edit(
                Role::Admin,
                "Naruto",
                Item::new(8, "Naruto", "Masashi Kishimoto", "Action"),
            )
            .expect_err("id 8 belongs to Bleach");
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                id: ItemId(8),
                title: "Bleach".to_string(),
            }
        );
        assert_eq!(err.to_string(), "id 8 is already used by 'Bleach'");
        assert_eq!(catalog.find("Naruto").map(|i| i.id), Some(ItemId(1)));
        assert_eq!(
            catalog.store().get(ItemId(8)).map(|i| i.title.as_str()),
            Some("Bleach")
        );
        assert_eq!(catalog.store().len(), catalog.index().count());

        let reopened = Catalog::open(catalog.store().clone()).expect("reopen");
        assert!(reopened.find("Bleach").is_some());
    }

    #[test]
    fn test_edit_keeps_own_id() {
        let mut catalog = open_sample();
        catalog
            .edit(
                Role::Admin,
                "Naruto",
                Item::new(1, "Naruto", "Masashi Kishimoto", "Action, Adventure"),
            )
            .expect("edit");
        assert_eq!(
            catalog.store().get(ItemId(1)).map(|i| i.genre.as_str()),
            Some("Action, Adventure")
        );
    }

    #[test]
    fn test_add_rejects_id_of_another_item() {
        let mut catalog = open_sample();
        let err = catalog
            .add(Role::Admin, Item::new(8, "Vagabond", "Takehiko Inoue", "Drama"))
            .expect_err("id 8 belongs to Bleach");
        assert!(matches!(err, CatalogError::DuplicateId { id: ItemId(8), .. }));
        assert!(catalog.find("Vagabond").is_none());
        assert_eq!(catalog.store().len(), 10);
    }

    #[test]
    fn test_open_skips_conflicting_titles() {
        let store = MemoryStore::with_items(vec![
            Item::new(1, "Monster", "Naoki Urasawa", "Thriller"),
            Item::new(2, "Monster", "Someone Else", "Horror"),
            Item::new(3, "Pluto", "Naoki Urasawa", "Sci-Fi"),
        ]);
        let catalog = Catalog::open(store).expect("open");
        assert_eq!(catalog.index().count(), 2);
        assert_eq!(
            catalog.find("Monster").map(|i| i.author.as_str()),
            Some("Naoki Urasawa")
        );
        assert!(catalog.find("Pluto").is_some());
        assert_eq!(catalog.store().len(), 3);
    }

    #[test]
    fn test_rename_author_writes_through() {
        let mut catalog = Catalog::open(MemoryStore::with_items(vec![
            Item::new(1, "Monster", "Urasawa", "Thriller"),
            Item::new(2, "Pluto", "Urasawa", "Sci-Fi"),
            Item::new(3, "Berserk", "Miura", "Dark Fantasy"),
        ]))
        .expect("open");

        let changed = catalog
            .rename_author(Role::Admin, "Urasawa", " Naoki Urasawa ")
            .expect("rename");
        let ids: Vec<ItemId> = changed.iter().map(|i| i.id).collect();
        assert_eq!(ids, [ItemId(1), ItemId(2)]);
        for id in ids {
            assert_eq!(
                catalog.store().get(id).map(|i| i.author.as_str()),
                Some("Naoki Urasawa")
            );
        }
        assert_eq!(catalog.search(SearchField::Author, "urasawa").len(), 2);
        assert_eq!(
            catalog.store().get(ItemId(3)).map(|i| i.author.as_str()),
            Some("Miura")
        );

        let none = catalog
            .rename_author(Role::Admin, "Nobody", "Somebody")
            .expect("rename");
        assert!(none.is_empty());
    }

    #[test]
    fn test_rename_genre_rewrites_multi_value_fields() {
        let mut catalog = Catalog::open(MemoryStore::with_items(vec![
            Item::new(1, "Gintama", "Sorachi", "Action, Comedy"),
            Item::new(2, "K-On!", "Kakifly", "Comedy, Music"),
            Item::new(3, "Berserk", "Miura", "Dark Fantasy"),
        ]))
        .expect("open");

        let changed = catalog
            .rename_genre(Role::Admin, "Comedy", "Gag")
            .expect("rename");
        assert_eq!(changed.len(), 2);
        assert_eq!(
            catalog.store().get(ItemId(1)).map(|i| i.genre.as_str()),
            Some("Action, Gag")
        );
        assert_eq!(
            catalog.find("K-On!").map(|i| i.genre.as_str()),
            Some("Gag, Music")
        );
        assert!(catalog.search(SearchField::Genre, "comedy").is_empty());
    }

    #[test]
    fn test_rename_rejections() {
        let mut catalog = open_sample();
        assert!(matches!(
            catalog.rename_genre(Role::User, "Action", "Battle"),
            Err(CatalogError::Unauthorized { action: "rename" })
        ));
        assert_eq!(
            catalog.rename_author(Role::Admin, "Tite Kubo", "   "),
            Err(CatalogError::InvalidName(String::new()))
        );
        assert_eq!(
            catalog.rename_genre(Role::Admin, "Action", "Action, Drama"),
            Err(CatalogError::InvalidName("Action, Drama".to_string()))
        );
        assert_eq!(
            catalog.find("Bleach").map(|i| (i.author.as_str(), i.genre.as_str())),
            Some(("Tite Kubo", "Action"))
        );
    }

    #[test]
    fn test_store_failure_is_reported() {
        let mut catalog = open_sample();
        catalog.store.set_offline(true);
        let err = catalog
            .delete(Role::Admin, "Berserk")
            .expect_err("store offline");
        assert!(matches!(err, CatalogError::Store(_)));
    }

    #[test]
    fn test_queries() {
        let catalog = open_sample();
        let found: Vec<&str> = catalog
            .search(SearchField::Genre, "fantasy")
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(found, ["Berserk", "Fullmetal Alchemist"]);

        let result = catalog.disambiguate("hunter");
        assert_eq!(result.best().map(|i| i.id), Some(ItemId(7)));

        let pre: Vec<&Item> = catalog.traverse(TraversalOrder::PreOrder).collect();
        assert_eq!(pre.first().map(|i| i.title.as_str()), Some("Naruto"));
    }

    #[test]
    fn test_shared_catalog_readers_across_threads() {
        let shared = open_sample().into_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    let catalog = shared.read().expect("read lock");
                    catalog.index().count()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("join"), 10);
        }

        shared
            .write()
            .expect("write lock")
            .delete(Role::Admin, "Naruto")
            .expect("delete");
        assert_eq!(shared.read().expect("read lock").index().count(), 9);
    }
}
