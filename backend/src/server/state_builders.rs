//! Builders for the HTTP adapter state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use marketplace::domain::ListService;
use marketplace::domain::ports::{
    FixtureListRepository, FixtureUserRepository, ListsCommand, ListsQuery,
};
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::persistence::{DieselListRepository, DieselUserRepository};

use super::ServerConfig;

/// Build HTTP state backed by PostgreSQL when a pool is configured,
/// otherwise by empty fixture repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let empty_as_ok = config.lists_empty_as_ok;
    let state = match &config.db_pool {
        Some(pool) => {
            let service = ListService::new(
                Arc::new(DieselListRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
            )
            .with_empty_lists_ok(empty_as_ok);
            into_state(service)
        }
        None => {
            warn!("no database configured; serving empty fixture data");
            let service = ListService::new(
                Arc::new(FixtureListRepository),
                Arc::new(FixtureUserRepository),
            )
            .with_empty_lists_ok(empty_as_ok);
            into_state(service)
        }
    };
    web::Data::new(state)
}

fn into_state<S>(service: S) -> HttpState
where
    S: ListsCommand + ListsQuery + 'static,
{
    let service = Arc::new(service);
    HttpState::new(service.clone(), service)
}
