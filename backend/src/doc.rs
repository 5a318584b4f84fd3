//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the error envelope schemas. The document backs Swagger UI in debug
//! builds and is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::categories::CategoriesResponseBody;
use crate::inbound::http::items::{ItemListingBody, SearchItemsResponseBody};
use crate::inbound::http::lists::{
    CreateListRequestBody, CreateListResponseBody, ListDetailsResponseBody, ListsResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace backend API",
        description = "Lists of items for sale, item search and category discovery."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::lists::create_list,
        crate::inbound::http::lists::get_lists,
        crate::inbound::http::lists::get_list,
        crate::inbound::http::items::search_items,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateListRequestBody,
        CreateListResponseBody,
        ListsResponseBody,
        ListDetailsResponseBody,
        ItemListingBody,
        SearchItemsResponseBody,
        CategoriesResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "lists", description = "Create and read lists of items"),
        (name = "items", description = "Search items across lists"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
