//! Category enumeration HTTP handler.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Distinct list categories, sorted ascending.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriesResponseBody {
    #[schema(example = json!(["Electronics", "Tools"]))]
    pub categories: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Distinct categories", body = CategoriesResponseBody),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CategoriesResponseBody>> {
    let response = state.lists_query.list_categories().await?;
    Ok(web::Json(CategoriesResponseBody {
        categories: response.categories,
    }))
}
