//! Item search HTTP handler.
//!
//! ```text
//! GET /items?search=hammer&category=Tools&category=Garden&minPrice=5&maxPrice=20
//! ```

use actix_web::{HttpRequest, get, web};
use serde::Serialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ItemListing, SearchItemsRequest};
use crate::domain::list_service::map_validation_error;
use crate::domain::{Error, ItemSearch, ItemSearchBuilder, ListSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::lists::OwnerBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_number};

const MIN_PRICE: FieldName = FieldName::new("minPrice");
const MAX_PRICE: FieldName = FieldName::new("maxPrice");

/// Recognised item search parameters.
///
/// `category` may repeat; blank values are ignored. Unknown keys are
/// ignored too.
#[derive(Debug, Clone, Default, PartialEq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemSearchParams {
    /// Case-insensitive substring of the item name or description.
    pub search: Option<String>,
    /// Accepted list categories (case-insensitive substring match).
    #[param(value_type = Option<Vec<String>>)]
    pub category: Vec<String>,
    /// Inclusive lower price bound.
    #[param(rename = "minPrice", value_type = Option<f64>)]
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    #[param(rename = "maxPrice", value_type = Option<f64>)]
    pub max_price: Option<String>,
}

impl ItemSearchParams {
    /// Collect parameters from a raw query string.
    pub fn from_query(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes()).fold(
            Self::default(),
            |mut params, (key, value)| {
                match key.as_ref() {
                    "search" => params.search = Some(value.into_owned()),
                    "category" => params.category.push(value.into_owned()),
                    "minPrice" => params.min_price = Some(value.into_owned()),
                    "maxPrice" => params.max_price = Some(value.into_owned()),
                    _ => {}
                }
                params
            },
        )
    }

    /// Validate the parameters into an [`ItemSearch`].
    pub fn into_search(self) -> Result<ItemSearch, Error> {
        let min_price = parse_optional_number(self.min_price.as_deref(), MIN_PRICE)?;
        let max_price = parse_optional_number(self.max_price.as_deref(), MAX_PRICE)?;

        let mut builder = ItemSearch::builder().categories(self.category);
        if let Some(text) = self.search {
            builder = builder.text(text);
        }
        if let Some(min) = min_price {
            builder = builder.min_price(min);
        }
        if let Some(max) = max_price {
            builder = builder.max_price(max);
        }
        finish_search(builder)
    }
}

fn finish_search(builder: ItemSearchBuilder) -> Result<ItemSearch, Error> {
    builder.build().map_err(|err| map_validation_error(&err))
}

/// List fields joined onto a search result.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSummaryBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub listname: String,
    pub category: String,
}

/// Item joined to its list and owner.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemListingBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub photo: String,
    pub description: String,
    pub price: f64,
    pub list: ListSummaryBody,
    pub owner: OwnerBody,
}

/// Response payload for item search.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemsResponseBody {
    pub items: Vec<ItemListingBody>,
}

impl From<&ListSummary> for ListSummaryBody {
    fn from(value: &ListSummary) -> Self {
        Self {
            id: value.id.to_string(),
            listname: value.listname.clone(),
            category: value.category.clone(),
        }
    }
}

impl From<&ItemListing> for ItemListingBody {
    fn from(value: &ItemListing) -> Self {
        let item = &value.item;
        Self {
            id: item.id().to_string(),
            name: item.name().to_owned(),
            photo: item.photo().to_owned(),
            description: item.description().to_owned(),
            price: item.price().value(),
            list: ListSummaryBody::from(&value.list),
            owner: OwnerBody::from(&value.owner),
        }
    }
}

/// Search items across every list.
#[utoipa::path(
    get,
    path = "/items",
    params(ItemSearchParams),
    responses(
        (status = 200, description = "Matching items", body = SearchItemsResponseBody),
        (status = 400, description = "Invalid price bound", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "searchItems"
)]
#[get("/items")]
pub async fn search_items(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<SearchItemsResponseBody>> {
    let search = ItemSearchParams::from_query(req.query_string()).into_search()?;
    let response = state
        .lists_query
        .search_items(SearchItemsRequest { search })
        .await?;
    Ok(web::Json(SearchItemsResponseBody {
        items: response.items.iter().map(ItemListingBody::from).collect(),
    }))
}
