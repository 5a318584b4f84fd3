//! In-memory adapters for the list and user repository ports.
//!
//! Writes are validated against the stored users the same way the
//! PostgreSQL foreign keys would be, and a failed write leaves no trace.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marketplace::domain::ports::{
    ItemListing, ListDetails, ListRepository, ListRepositoryError, UserRepository,
    UserRepositoryError,
};
use marketplace::domain::{Item, ItemSearch, List, ListId, NewList, Owner, UserId};

#[derive(Default)]
struct Store {
    owners: Vec<Owner>,
    lists: Vec<List>,
    items: Vec<Item>,
    offline: bool,
}

/// Shared store implementing both repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryStore {
    pub fn with_owners(owners: impl IntoIterator<Item = Owner>) -> Self {
        let store = Self::default();
        store.lock().owners.extend(owners);
        store
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn go_offline(&self) {
        self.lock().offline = true;
    }

    pub fn list_count(&self) -> usize {
        self.lock().lists.len()
    }

    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.inner.lock().expect("store lock")
    }
}

impl Store {
    fn check_online(&self) -> Result<(), ListRepositoryError> {
        if self.offline {
            return Err(ListRepositoryError::connection("store offline"));
        }
        Ok(())
    }

    fn owner(&self, id: UserId) -> Result<Owner, ListRepositoryError> {
        self.owners
            .iter()
            .find(|owner| owner.id == id)
            .cloned()
            .ok_or_else(|| ListRepositoryError::query("referenced record does not exist"))
    }

    fn details(&self, list: &List) -> Result<ListDetails, ListRepositoryError> {
        let items: Vec<Item> = list
            .item_ids()
            .iter()
            .filter_map(|id| self.items.iter().find(|item| item.id() == *id))
            .filter(|item| item.list_id() == list.id())
            .cloned()
            .collect();
        Ok(ListDetails {
            list: list.clone(),
            owner: self.owner(list.owner_id())?,
            items,
        })
    }
}

#[async_trait]
impl ListRepository for InMemoryStore {
    async fn create(&self, new_list: &NewList) -> Result<(), ListRepositoryError> {
        let mut store = self.lock();
        store.check_online()?;
        store.owner(new_list.list().owner_id())?;
        store.lists.push(new_list.list().clone());
        store.items.extend(new_list.items().iter().cloned());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<ListDetails>, ListRepositoryError> {
        let store = self.lock();
        store.check_online()?;
        let mut lists = store.lists.clone();
        lists.sort_by(|a, b| {
            a.listname()
                .cmp(b.listname())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        lists.iter().map(|list| store.details(list)).collect()
    }

    async fn find_by_id(&self, id: &ListId) -> Result<Option<ListDetails>, ListRepositoryError> {
        let store = self.lock();
        store.check_online()?;
        store
            .lists
            .iter()
            .find(|list| list.id() == *id)
            .map(|list| store.details(list))
            .transpose()
    }

    async fn search_items(
        &self,
        search: &ItemSearch,
    ) -> Result<Vec<ItemListing>, ListRepositoryError> {
        let store = self.lock();
        store.check_online()?;
        let mut listings = Vec::new();
        for item in &store.items {
            let Some(list) = store.lists.iter().find(|list| list.id() == item.list_id()) else {
                continue;
            };
            let summary = list.summary();
            if search.matches(item, &summary) {
                listings.push(ItemListing {
                    item: item.clone(),
                    list: summary,
                    owner: store.owner(item.owner_id())?,
                });
            }
        }
        listings.sort_by(|a, b| {
            a.item
                .name()
                .cmp(b.item.name())
                .then_with(|| a.item.id().as_uuid().cmp(b.item.id().as_uuid()))
        });
        Ok(listings)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ListRepositoryError> {
        let store = self.lock();
        store.check_online()?;
        let mut categories: Vec<String> = store
            .lists
            .iter()
            .map(|list| list.category().to_owned())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Owner>, UserRepositoryError> {
        let store = self.lock();
        if store.offline {
            return Err(UserRepositoryError::connection("store offline"));
        }
        Ok(store.owners.iter().find(|owner| owner.id == *id).cloned())
    }
}
