//! PostgreSQL-backed `ListRepository` implementation using Diesel ORM.
//!
//! Lists and items live in separate tables. An item's `list_id` column is
//! the only record of membership; a list's item ids are derived from it in
//! `position` order whenever a list is read.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ItemListing, ListDetails, ListRepository, ListRepositoryError};
use crate::domain::{Item, ItemId, ItemSearch, ListId, NewList, Owner};

use super::diesel_helpers::{contains_pattern, map_basic_diesel_error, map_pool_error_message};
use super::models::{ItemRow, ListRow, NewItemRow, NewListRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{items, lists, users};

type SearchSource = diesel::helper_types::InnerJoinQuerySource<items::table, lists::table>;
type SearchPredicate = Box<dyn BoxableExpression<SearchSource, Pg, SqlType = Bool>>;

/// Diesel-backed implementation of the list repository port.
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use marketplace::outbound::persistence::{DbPool, DieselListRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/marketplace")).await?;
    /// let repo = DieselListRepository::new(pool);
    /// # let _ = repo;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListRepositoryError {
    ListRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ListRepositoryError {
    map_basic_diesel_error(
        error,
        ListRepositoryError::query,
        ListRepositoryError::connection,
    )
}

fn item_position(index: usize) -> Result<i32, ListRepositoryError> {
    i32::try_from(index)
        .map_err(|_| ListRepositoryError::query(format!("item position {index} out of range")))
}

fn owners_by_id(rows: Vec<UserRow>) -> HashMap<Uuid, Owner> {
    rows.into_iter()
        .map(|row| (row.id, Owner::from(row)))
        .collect()
}

fn lookup_owner(owners: &HashMap<Uuid, Owner>, id: Uuid) -> Result<Owner, String> {
    owners
        .get(&id)
        .cloned()
        .ok_or_else(|| format!("owner {id} missing for stored record"))
}

/// Join list rows with their items and owners.
///
/// Items are grouped by their `list_id` and ordered by `position`; the
/// order of `list_rows` is preserved.
fn assemble_details(
    list_rows: Vec<ListRow>,
    item_rows: Vec<ItemRow>,
    owner_rows: Vec<UserRow>,
) -> Result<Vec<ListDetails>, String> {
    let owners = owners_by_id(owner_rows);
    let mut grouped: HashMap<Uuid, Vec<ItemRow>> = HashMap::new();
    for row in item_rows {
        grouped.entry(row.list_id).or_default().push(row);
    }

    list_rows
        .into_iter()
        .map(|list_row| {
            let mut rows = grouped.remove(&list_row.id).unwrap_or_default();
            rows.sort_by_key(|row| row.position);
            let items = rows
                .into_iter()
                .map(|row| Item::try_from(row).map_err(|err| err.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let item_ids: Vec<ItemId> = items.iter().map(Item::id).collect();
            let owner = lookup_owner(&owners, list_row.owner_id)?;
            let list = list_row
                .into_list(item_ids)
                .map_err(|err| err.to_string())?;
            Ok(ListDetails { list, owner, items })
        })
        .collect()
}

fn assemble_listings(
    rows: Vec<(ItemRow, ListRow)>,
    owner_rows: Vec<UserRow>,
) -> Result<Vec<ItemListing>, String> {
    let owners = owners_by_id(owner_rows);
    rows.into_iter()
        .map(|(item_row, list_row)| {
            let owner = lookup_owner(&owners, item_row.owner_id)?;
            let list = list_row.summary();
            let item = Item::try_from(item_row).map_err(|err| err.to_string())?;
            Ok(ItemListing { item, list, owner })
        })
        .collect()
}

/// OR together one `ILIKE` clause per requested category.
fn category_predicate(categories: &[String]) -> Option<SearchPredicate> {
    categories.iter().fold(None, |acc, category| {
        let clause = lists::category.ilike(contains_pattern(category));
        let predicate: SearchPredicate = match acc {
            None => Box::new(clause),
            Some(existing) => Box::new(existing.or(clause)),
        };
        Some(predicate)
    })
}

async fn load_owners(
    conn: &mut AsyncPgConnection,
    mut ids: Vec<Uuid>,
) -> Result<Vec<UserRow>, ListRepositoryError> {
    ids.sort_unstable();
    ids.dedup();
    users::table
        .filter(users::id.eq_any(ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)
}

async fn load_details(
    conn: &mut AsyncPgConnection,
    list_rows: Vec<ListRow>,
) -> Result<Vec<ListDetails>, ListRepositoryError> {
    if list_rows.is_empty() {
        return Ok(Vec::new());
    }
    let list_ids: Vec<Uuid> = list_rows.iter().map(|row| row.id).collect();
    let item_rows: Vec<ItemRow> = items::table
        .filter(items::list_id.eq_any(list_ids))
        .select(ItemRow::as_select())
        .order_by((items::list_id.asc(), items::position.asc()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let owner_rows = load_owners(conn, list_rows.iter().map(|row| row.owner_id).collect()).await?;

    assemble_details(list_rows, item_rows, owner_rows).map_err(ListRepositoryError::query)
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn create(&self, new_list: &NewList) -> Result<(), ListRepositoryError> {
        let list_row = NewListRow::from(new_list.list());
        let item_rows = new_list
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| item_position(index).map(|position| NewItemRow::new(item, position)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(lists::table)
                    .values(&list_row)
                    .execute(conn)
                    .await?;
                if !item_rows.is_empty() {
                    diesel::insert_into(items::table)
                        .values(&item_rows)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        debug!(
            list_id = %new_list.list().id(),
            items = new_list.items().len(),
            "list persisted"
        );
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<ListDetails>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let list_rows: Vec<ListRow> = lists::table
            .select(ListRow::as_select())
            .order_by((lists::listname.asc(), lists::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        load_details(&mut conn, list_rows).await
    }

    async fn find_by_id(&self, id: &ListId) -> Result<Option<ListDetails>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let list_row: Option<ListRow> = lists::table
            .filter(lists::id.eq(*id.as_uuid()))
            .select(ListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(list_row) = list_row else {
            return Ok(None);
        };
        let mut details = load_details(&mut conn, vec![list_row]).await?;
        Ok(details.pop())
    }

    async fn search_items(
        &self,
        search: &ItemSearch,
    ) -> Result<Vec<ItemListing>, ListRepositoryError> {
        let mut query = items::table
            .inner_join(lists::table)
            .select((ItemRow::as_select(), ListRow::as_select()))
            .into_boxed();

        if let Some(text) = search.text() {
            let pattern = contains_pattern(text);
            query = query.filter(
                items::name
                    .ilike(pattern.clone())
                    .or(items::description.ilike(pattern)),
            );
        }
        if let Some(predicate) = category_predicate(search.categories()) {
            query = query.filter(predicate);
        }
        if let Some(min) = search.min_price() {
            query = query.filter(items::price.ge(min));
        }
        if let Some(max) = search.max_price() {
            query = query.filter(items::price.le(max));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ItemRow, ListRow)> = query
            .order_by((items::name.asc(), items::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids = rows.iter().map(|(item, _)| item.owner_id).collect();
        let owner_rows = load_owners(&mut conn, owner_ids).await?;
        assemble_listings(rows, owner_rows).map_err(ListRepositoryError::query)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        lists::table
            .select(lists::category)
            .distinct()
            .order_by(lists::category.asc())
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
