//! List HTTP handlers.
//!
//! ```text
//! POST /lists
//! GET  /lists
//! GET  /lists/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateListRequest, CreateListResponse, GetListRequest, ListDetails};
use crate::domain::{Error, Item, ItemDraft, List, ListDraft, ListId, Owner, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require};

const LISTNAME: FieldName = FieldName::new("listname");
const CATEGORY: FieldName = FieldName::new("category");
const OWNER: FieldName = FieldName::new("owner");
const LIST_ID: FieldName = FieldName::new("id");

/// Message returned after a successful creation.
pub const LIST_CREATED_MESSAGE: &str = "List and items created successfully.";
/// Message returned alongside every list collection.
pub const LISTS_RETRIEVED_MESSAGE: &str = "Lists retrieved successfully.";

/// Request payload for creating a list with its items.
///
/// Fields are optional at the wire level so a missing field is reported by
/// name instead of as a generic JSON error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequestBody {
    #[schema(example = "Garage Sale")]
    pub listname: Option<String>,
    #[schema(example = "Tools")]
    pub category: Option<String>,
    #[schema(format = "uuid")]
    pub owner: Option<String>,
    pub items: Option<Vec<ItemRequestBody>>,
}

/// Item submitted with a new list.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestBody {
    pub name: Option<String>,
    #[schema(example = "http://example.com/hammer.jpg")]
    pub photo: Option<String>,
    pub description: Option<String>,
    #[schema(minimum = 0.0)]
    pub price: Option<f64>,
}

/// Persisted list with item ids.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub listname: String,
    pub category: String,
    #[schema(format = "uuid")]
    pub owner: String,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub items: Vec<String>,
}

/// Response payload for list creation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListResponseBody {
    pub message: String,
    pub list: CreatedListBody,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub items: Vec<String>,
}

/// Owner contact details without the identifier.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerContactBody {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Owner details including the identifier.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Item fields shown inside a list overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummaryBody {
    pub name: String,
    pub photo: String,
    pub description: String,
    pub price: f64,
}

/// One list in the collection response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOverviewBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub listname: String,
    pub category: String,
    pub owner: OwnerContactBody,
    pub items: Vec<ItemSummaryBody>,
}

/// Response payload for the list collection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListsResponseBody {
    pub message: String,
    pub lists: Vec<ListOverviewBody>,
}

/// List header in the single-list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDetailsBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub listname: String,
    pub category: String,
    pub owner: OwnerBody,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub items: Vec<String>,
}

/// Item with its list and owner references.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub photo: String,
    pub description: String,
    pub price: f64,
    #[schema(format = "uuid")]
    pub list: String,
    #[schema(format = "uuid")]
    pub owner: String,
}

/// Response payload for a single list.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDetailsResponseBody {
    pub list_details: ListDetailsBody,
    pub items: Vec<ItemBody>,
}

fn required_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    require(value.filter(|text| !text.trim().is_empty()), field)
}

impl From<ItemRequestBody> for ItemDraft {
    fn from(value: ItemRequestBody) -> Self {
        Self {
            name: value.name,
            photo: value.photo,
            description: value.description,
            price: value.price,
        }
    }
}

fn parse_list_draft(payload: CreateListRequestBody) -> Result<ListDraft, Error> {
    let listname = required_text(payload.listname, LISTNAME)?;
    let category = required_text(payload.category, CATEGORY)?;
    let owner = required_text(payload.owner, OWNER)?;
    let owner = UserId::from_uuid(parse_uuid(&owner, OWNER)?);
    let items = payload
        .items
        .unwrap_or_default()
        .into_iter()
        .map(ItemDraft::from)
        .collect();
    Ok(ListDraft {
        listname,
        category,
        owner,
        items,
    })
}

fn id_strings(ids: impl IntoIterator<Item = impl ToString>) -> Vec<String> {
    ids.into_iter().map(|id| id.to_string()).collect()
}

impl From<&Owner> for OwnerBody {
    fn from(value: &Owner) -> Self {
        Self {
            id: value.id.to_string(),
            firstname: value.first_name.clone(),
            lastname: value.last_name.clone(),
            email: value.email.clone(),
        }
    }
}

impl From<&Owner> for OwnerContactBody {
    fn from(value: &Owner) -> Self {
        Self {
            firstname: value.first_name.clone(),
            lastname: value.last_name.clone(),
            email: value.email.clone(),
        }
    }
}

impl From<&Item> for ItemSummaryBody {
    fn from(value: &Item) -> Self {
        Self {
            name: value.name().to_owned(),
            photo: value.photo().to_owned(),
            description: value.description().to_owned(),
            price: value.price().value(),
        }
    }
}

impl From<&Item> for ItemBody {
    fn from(value: &Item) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            photo: value.photo().to_owned(),
            description: value.description().to_owned(),
            price: value.price().value(),
            list: value.list_id().to_string(),
            owner: value.owner_id().to_string(),
        }
    }
}

impl From<&List> for CreatedListBody {
    fn from(value: &List) -> Self {
        Self {
            id: value.id().to_string(),
            listname: value.listname().to_owned(),
            category: value.category().to_owned(),
            owner: value.owner_id().to_string(),
            items: id_strings(value.item_ids()),
        }
    }
}

impl From<CreateListResponse> for CreateListResponseBody {
    fn from(value: CreateListResponse) -> Self {
        Self {
            message: LIST_CREATED_MESSAGE.to_owned(),
            list: CreatedListBody::from(&value.list),
            items: id_strings(value.item_ids),
        }
    }
}

impl From<&ListDetails> for ListOverviewBody {
    fn from(value: &ListDetails) -> Self {
        Self {
            id: value.list.id().to_string(),
            listname: value.list.listname().to_owned(),
            category: value.list.category().to_owned(),
            owner: OwnerContactBody::from(&value.owner),
            items: value.items.iter().map(ItemSummaryBody::from).collect(),
        }
    }
}

impl From<&ListDetails> for ListDetailsResponseBody {
    fn from(value: &ListDetails) -> Self {
        Self {
            list_details: ListDetailsBody {
                id: value.list.id().to_string(),
                listname: value.list.listname().to_owned(),
                category: value.list.category().to_owned(),
                owner: OwnerBody::from(&value.owner),
                items: id_strings(value.list.item_ids()),
            },
            items: value.items.iter().map(ItemBody::from).collect(),
        }
    }
}

/// Create a list together with its items.
///
/// List fields are checked first, then the owner must exist, then every
/// item is validated. A failure at any step leaves nothing behind.
#[utoipa::path(
    post,
    path = "/lists",
    request_body = CreateListRequestBody,
    responses(
        (status = 201, description = "List and items created", body = CreateListResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Owner not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "createList"
)]
#[post("/lists")]
pub async fn create_list(
    state: web::Data<HttpState>,
    payload: web::Json<CreateListRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_list_draft(payload.into_inner())?;
    let response = state.lists.create_list(CreateListRequest { draft }).await?;
    Ok(HttpResponse::Created().json(CreateListResponseBody::from(response)))
}

/// Fetch every list with owners and items expanded.
#[utoipa::path(
    get,
    path = "/lists",
    responses(
        (status = 200, description = "Lists retrieved", body = ListsResponseBody),
        (status = 404, description = "No lists found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "getLists"
)]
#[get("/lists")]
pub async fn get_lists(state: web::Data<HttpState>) -> ApiResult<web::Json<ListsResponseBody>> {
    let response = state.lists_query.list_lists().await?;
    Ok(web::Json(ListsResponseBody {
        message: LISTS_RETRIEVED_MESSAGE.to_owned(),
        lists: response.lists.iter().map(ListOverviewBody::from).collect(),
    }))
}

/// Fetch one list and the items whose back-reference names it.
#[utoipa::path(
    get,
    path = "/lists/{id}",
    params(("id" = uuid::Uuid, Path, description = "List identifier")),
    responses(
        (status = 200, description = "List retrieved", body = ListDetailsResponseBody),
        (status = 400, description = "Malformed list id", body = ErrorSchema),
        (status = 404, description = "List not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "getList"
)]
#[get("/lists/{id}")]
pub async fn get_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListDetailsResponseBody>> {
    let list_id = ListId::from_uuid(parse_uuid(&path.into_inner(), LIST_ID)?);
    let response = state.lists_query.get_list(GetListRequest { list_id }).await?;
    Ok(web::Json(ListDetailsResponseBody::from(&response.details)))
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
