//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` against a migrated database regenerates them.

diesel::table! {
    /// Account records that own lists and items.
    users (id) {
        id -> Uuid,
        #[max_length = 100]
        firstname -> Varchar,
        #[max_length = 100]
        lastname -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named, categorised collections of items.
    lists (id) {
        id -> Uuid,
        listname -> Text,
        category -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Items for sale. `list_id` is the authoritative back-reference and
    /// `position` records submission order within the list.
    items (id) {
        id -> Uuid,
        list_id -> Uuid,
        owner_id -> Uuid,
        position -> Int4,
        name -> Text,
        photo -> Text,
        description -> Text,
        price -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(items -> lists (list_id));
diesel::joinable!(lists -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(items, lists, users);
