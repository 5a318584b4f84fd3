//! Integration tests for the Diesel list and user repositories against
//! embedded PostgreSQL.
//!
//! Each test gets a fresh database with the embedded migrations applied,
//! seeded with two owners. Queries run for real, so `ILIKE` escaping, the
//! items/lists join, price bounds and transaction rollback are all exercised
//! by PostgreSQL itself.

use diesel::pg::PgConnection;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use diesel::{Connection, RunQueryDsl};
use marketplace::domain::ports::{ListRepository, ListRepositoryError, UserRepository};
use marketplace::domain::{
    Item, ItemDraft, ItemSearch, ItemSearchBuilder, ListDraft, NewList, UserId,
};
use marketplace::outbound::persistence::{
    DbPool, DieselListRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, shared_cluster};

const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const GRACE_ID: &str = "9b2d6f3e-1c4a-4f7b-8e21-5d0c7a9e4b13";

struct TestContext {
    runtime: Runtime,
    lists: DieselListRepository,
    users: DieselUserRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id is valid")
}

fn seed_owners(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    let owners = [
        (ADA_ID, "Ada", "Lovelace", "ada@example.com"),
        (GRACE_ID, "Grace", "Hopper", "grace@example.com"),
    ];
    for (id, firstname, lastname, email) in owners {
        let id = *user_id(id).as_uuid();
        diesel::sql_query(
            "INSERT INTO users (id, firstname, lastname, email) VALUES ($1, $2, $3, $4)",
        )
        .bind::<SqlUuid, _>(id)
        .bind::<Text, _>(firstname)
        .bind::<Text, _>(lastname)
        .bind::<Text, _>(email)
        .execute(&mut conn)
        .map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4()))
        .map_err(|err| format!("{err:?}"))?;
    let database_url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    seed_owners(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        lists: DieselListRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_list(listname: &str, category: &str, owner: &str, items: &[(&str, &str, f64)]) -> NewList {
    NewList::new(ListDraft {
        listname: listname.to_owned(),
        category: category.to_owned(),
        owner: user_id(owner),
        items: items
            .iter()
            .map(|(name, description, price)| {
                ItemDraft::new(
                    *name,
                    format!("http://img.example/{}.jpg", name.to_lowercase()),
                    *description,
                    *price,
                )
            })
            .collect(),
    })
    .expect("valid draft")
}

fn seed_lists(ctx: &TestContext) -> Vec<NewList> {
    let lists = vec![
        new_list(
            "Workshop clear-out",
            "Tools",
            ADA_ID,
            &[
                ("Cordless Drill", "18V with two batteries", 45.0),
                ("Hammer", "Claw hammer, steel shaft", 8.5),
            ],
        ),
        new_list(
            "Garden things",
            "Garden Tools",
            GRACE_ID,
            &[("Rake", "Leaf rake, barely used", 12.0)],
        ),
        new_list(
            "Desk upgrade",
            "Electronics",
            ADA_ID,
            &[("Monitor", "27 inch, includes DRILL-proof stand", 120.0)],
        ),
        new_list(
            "Closet",
            "100% Cotton",
            GRACE_ID,
            &[("Tee_shirt", "50% off", 5.0)],
        ),
    ];
    for list in &lists {
        ctx.runtime
            .block_on(ctx.lists.create(list))
            .expect("seed list persists");
    }
    lists
}

fn names(items: impl IntoIterator<Item = Item>) -> Vec<String> {
    items.into_iter().map(|item| item.name().to_owned()).collect()
}

#[rstest]
fn created_list_reads_back_with_items_in_submission_order(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let created = new_list(
        "Garage Sale",
        "Tools",
        ADA_ID,
        &[("Saw", "Hand saw", 15.0), ("Anvil", "Heavy", 0.0), ("Bolt", "M8", 0.2)],
    );
    ctx.runtime
        .block_on(ctx.lists.create(&created))
        .expect("list persists");

    let details = ctx
        .runtime
        .block_on(ctx.lists.find_by_id(&created.list().id()))
        .expect("query succeeds")
        .expect("list exists");

    assert_eq!(details.list, *created.list());
    assert_eq!(details.list.item_ids(), created.list().item_ids());
    assert_eq!(details.owner.email, "ada@example.com");
    assert_eq!(names(details.items), ["Saw", "Anvil", "Bolt"]);
}

#[rstest]
fn find_all_orders_lists_by_name(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    seed_lists(&ctx);

    let lists = ctx
        .runtime
        .block_on(ctx.lists.find_all())
        .expect("query succeeds");

    let listnames: Vec<&str> = lists.iter().map(|details| details.list.listname()).collect();
    assert_eq!(
        listnames,
        ["Closet", "Desk upgrade", "Garden things", "Workshop clear-out"]
    );
    assert_eq!(lists[2].owner.first_name, "Grace");
    assert_eq!(
        names(lists[3].items.clone()),
        ["Cordless Drill", "Hammer"]
    );
}

#[rstest]
fn unknown_list_id_is_absent(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let unsaved = new_list("Never stored", "Misc", ADA_ID, &[]);

    let found = ctx
        .runtime
        .block_on(ctx.lists.find_by_id(&unsaved.list().id()))
        .expect("query succeeds");

    assert!(found.is_none());
}

#[rstest]
#[case::no_filters(
    ItemSearch::builder(),
    &["Cordless Drill", "Hammer", "Monitor", "Rake", "Tee_shirt"]
)]
#[case::text_matches_name_or_description(
    ItemSearch::builder().text("drill"),
    &["Cordless Drill", "Monitor"]
)]
#[case::category_substring(ItemSearch::builder().category("tools"), &["Cordless Drill", "Hammer", "Rake"])]
#[case::categories_are_alternatives(
    ItemSearch::builder().category("Garden").category("Electronics"),
    &["Monitor", "Rake"]
)]
#[case::text_and_category_both_apply(
    ItemSearch::builder().text("a").category("Electronics"),
    &["Monitor"]
)]
#[case::price_bounds_are_inclusive(
    ItemSearch::builder().min_price(8.5).max_price(45.0),
    &["Cordless Drill", "Hammer", "Rake"]
)]
#[case::percent_is_literal(ItemSearch::builder().text("%"), &["Tee_shirt"])]
#[case::underscore_is_literal(ItemSearch::builder().text("_"), &["Tee_shirt"])]
#[case::category_wildcards_are_literal(ItemSearch::builder().category("_"), &[])]
#[case::nothing_matches(ItemSearch::builder().text("piano"), &[])]
fn search_applies_every_filter(
    context: Option<TestContext>,
    #[case] builder: ItemSearchBuilder,
    #[case] expected: &[&str],
) {
    let Some(ctx) = context else { return };
    seed_lists(&ctx);
    let search = builder.build().expect("finite bounds");

    let listings = ctx
        .runtime
        .block_on(ctx.lists.search_items(&search))
        .expect("query succeeds");

    let found: Vec<&str> = listings.iter().map(|listing| listing.item.name()).collect();
    assert_eq!(found, expected);
}

#[rstest]
fn search_results_join_list_and_owner(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let seeded = seed_lists(&ctx);
    let search = ItemSearch::builder()
        .text("rake")
        .build()
        .expect("valid search");

    let listings = ctx
        .runtime
        .block_on(ctx.lists.search_items(&search))
        .expect("query succeeds");

    let [listing] = listings.as_slice() else {
        panic!("expected one listing, got {}", listings.len());
    };
    assert_eq!(listing.list, seeded[1].list().summary());
    assert_eq!(listing.item.list_id(), seeded[1].list().id());
    assert_eq!(listing.owner.id, user_id(GRACE_ID));
    assert_eq!(listing.item.price().value(), 12.0);
}

#[rstest]
fn categories_are_distinct_and_sorted(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    seed_lists(&ctx);
    ctx.runtime
        .block_on(ctx.lists.create(&new_list("More tools", "Tools", GRACE_ID, &[])))
        .expect("list persists");

    let categories = ctx
        .runtime
        .block_on(ctx.lists.distinct_categories())
        .expect("query succeeds");

    assert_eq!(
        categories,
        ["100% Cotton", "Electronics", "Garden Tools", "Tools"]
    );
}

#[rstest]
fn failed_item_insert_rolls_back_the_list(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let mut conn = PgConnection::establish(&ctx.database_url).expect("direct connection");
    diesel::sql_query("ALTER TABLE items ADD CONSTRAINT items_reject_saw CHECK (name <> 'Saw')")
        .execute(&mut conn)
        .expect("constraint added");
    let rejected = new_list(
        "Half valid",
        "Tools",
        ADA_ID,
        &[("Hammer", "Steel", 8.0), ("Saw", "Hand saw", 15.0)],
    );

    let err = ctx
        .runtime
        .block_on(ctx.lists.create(&rejected))
        .expect_err("item insert fails");

    assert!(matches!(err, ListRepositoryError::Query { .. }), "{err:?}");
    let stored = ctx
        .runtime
        .block_on(ctx.lists.find_by_id(&rejected.list().id()))
        .expect("query succeeds");
    assert!(stored.is_none());
    let items = ctx
        .runtime
        .block_on(ctx.lists.search_items(&ItemSearch::default()))
        .expect("query succeeds");
    assert!(items.is_empty());
}

#[rstest]
fn unknown_owner_is_rejected_by_the_database(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let orphan = new_list(
        "Ghost sale",
        "Tools",
        "00000000-0000-4000-8000-000000000000",
        &[("Lamp", "Brass", 5.0)],
    );

    let err = ctx
        .runtime
        .block_on(ctx.lists.create(&orphan))
        .expect_err("foreign key violation");

    assert_eq!(
        err,
        ListRepositoryError::query("referenced record does not exist")
    );
    let lists = ctx
        .runtime
        .block_on(ctx.lists.find_all())
        .expect("query succeeds");
    assert!(lists.is_empty());
}

#[rstest]
fn user_repository_resolves_seeded_owners(context: Option<TestContext>) {
    let Some(ctx) = context else { return };

    let ada = ctx
        .runtime
        .block_on(ctx.users.find_by_id(&user_id(ADA_ID)))
        .expect("query succeeds")
        .expect("owner exists");
    let missing = ctx
        .runtime
        .block_on(ctx.users.find_by_id(&UserId::random()))
        .expect("query succeeds");

    assert_eq!(ada.last_name, "Lovelace");
    assert!(missing.is_none());
}
