//! Shared helpers for HTTP integration tests.

pub mod in_memory;

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use marketplace::Trace;
use marketplace::domain::{ListService, Owner, UserId};
use marketplace::inbound::http::configure;
use marketplace::inbound::http::state::HttpState;
use serde_json::Value;

use in_memory::InMemoryStore;

pub const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub const GRACE_ID: &str = "9b2d6f3e-1c4a-4f7b-8e21-5d0c7a9e4b13";

pub fn owners() -> Vec<Owner> {
    vec![
        Owner {
            id: UserId::new(ADA_ID).expect("valid id"),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
        },
        Owner {
            id: UserId::new(GRACE_ID).expect("valid id"),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            email: "grace@example.com".to_owned(),
        },
    ]
}

/// Build the application over `store` with the production middleware.
pub async fn init_app(
    store: &InMemoryStore,
    empty_lists_ok: bool,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let service = Arc::new(
        ListService::new(Arc::new(store.clone()), Arc::new(store.clone()))
            .with_empty_lists_ok(empty_lists_ok),
    );
    let state = HttpState::new(service.clone(), service);
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Status, trace header and JSON body of a response.
pub struct Captured {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub async fn send<S>(app: &S, request: Request) -> Captured
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get(marketplace::domain::TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let body = test::read_body_json(response).await;
    Captured {
        status,
        trace_id,
        body,
    }
}
