//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed marketplace entities used by the HTTP and
//! persistence adapters. Types are immutable once validated; invariants and
//! serialisation contracts live in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - TraceId: request-scoped correlation identifier.
//! - UserId / Owner: user identity and the owner projection.
//! - List / Item / NewList / ItemSearch: the listing aggregate and filters.
//! - ListService: implementation of the lists driving ports.

pub mod error;
pub mod list_service;
pub mod lists;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::list_service::ListService;
pub use self::lists::{
    Item, ItemDraft, ItemId, ItemSearch, ItemSearchBuilder, List, ListDraft, ListId,
    ListSummary, ListingValidationError, NewList, Price,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Owner, UserId, UserValidationError};
