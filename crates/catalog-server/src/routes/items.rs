//! Item route handlers.
//!
//! Success bodies use the `{status, data}` envelope; list is a bare array.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use catalog_core::{Error, ItemForm, ItemId};
use catalog_db::{Item, ItemSummary};
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

/// Item response. Image bytes are base64-encoded.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub mime: Option<String>,
    pub raw_data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ItemResponse {
    fn from_model(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            mime: item.image.as_ref().map(|img| img.mime.clone()),
            raw_data: item.image.as_ref().map(|img| STANDARD.encode(&img.data)),
            created_at: item.created_at.clone(),
            updated_at: item.updated_at.clone(),
        }
    }
}

/// `{status: "FOUND", data: item}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ItemFoundResponse {
    pub status: String,
    pub data: ItemResponse,
}

/// `{status: "create" | "update" | "delete", data: name}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ItemWriteResponse {
    pub status: String,
    pub data: String,
}

/// `{status: "FOUND", data: [...]}` or `{status: "NOT-FOUND"}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ItemSummary>>,
}

type IdPath = Result<Path<String>, PathRejection>;

/// A malformed or undecodable id cannot name a stored item.
fn parse_id(path: IdPath) -> Result<ItemId, Error> {
    match path {
        Ok(Path(id)) => id.parse().map_err(|_| Error::not_found("item", id)),
        Err(rejection) => Err(Error::not_found("item", rejection.body_text())),
    }
}

/// GET /api/items
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "Every item", body = Vec<ItemResponse>)
    )
)]
pub async fn list_items(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = ctx.items.list().await?;
    Ok(Json(items.iter().map(ItemResponse::from_model).collect()))
}

/// POST /api/items
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemForm,
    responses(
        (status = 201, description = "Item created", body = ItemWriteResponse),
        (status = 400, description = "Image payload could not be decoded"),
        (status = 415, description = "Image is not GIF, JPEG, BMP, or PNG"),
        (status = 422, description = "Invalid name, description, or price")
    )
)]
pub async fn create_item(
    State(ctx): State<AppContext>,
    payload: Result<Json<ItemForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemWriteResponse>), AppError> {
    let Json(form) = payload?;
    let item = ctx.items.create(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemWriteResponse {
            status: "create".into(),
            data: item.name,
        }),
    ))
}

/// GET /api/items/{id}
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ItemFoundResponse),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(ctx): State<AppContext>,
    id: IdPath,
) -> Result<Json<ItemFoundResponse>, AppError> {
    let item = ctx.items.get(parse_id(id)?).await?;

    Ok(Json(ItemFoundResponse {
        status: "FOUND".into(),
        data: ItemResponse::from_model(&item),
    }))
}

/// PUT /api/items/{id}
///
/// Full replacement: omitting `img` removes any stored image.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    request_body = ItemForm,
    responses(
        (status = 200, description = "Item updated", body = ItemWriteResponse),
        (status = 400, description = "Image payload could not be decoded"),
        (status = 404, description = "Item not found"),
        (status = 415, description = "Image is not GIF, JPEG, BMP, or PNG"),
        (status = 422, description = "Invalid name, description, or price")
    )
)]
pub async fn update_item(
    State(ctx): State<AppContext>,
    id: IdPath,
    payload: Result<Json<ItemForm>, JsonRejection>,
) -> Result<Json<ItemWriteResponse>, AppError> {
    let id = parse_id(id)?;
    // Unknown ids win over a malformed body.
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            ctx.items.get(id).await?;
            return Err(rejection.into());
        }
    };

    let item = ctx.items.update(id, form).await?;

    Ok(Json(ItemWriteResponse {
        status: "update".into(),
        data: item.name,
    }))
}

/// DELETE /api/items/{id}
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted", body = ItemWriteResponse),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(ctx): State<AppContext>,
    id: IdPath,
) -> Result<Json<ItemWriteResponse>, AppError> {
    let name = ctx.items.delete(parse_id(id)?).await?;

    Ok(Json(ItemWriteResponse {
        status: "delete".into(),
        data: name,
    }))
}

/// GET /api/items/search/{keyword}
#[utoipa::path(
    get,
    path = "/api/items/search/{keyword}",
    params(("keyword" = String, Path, description = "Substring to look for in item names")),
    responses(
        (status = 200, description = "Matching items, or NOT-FOUND", body = SearchResponse)
    )
)]
pub async fn search_items(
    State(ctx): State<AppContext>,
    keyword: Result<Path<String>, PathRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Path(keyword) = keyword?;
    let hits = ctx.items.search(keyword).await?;

    let response = if hits.is_empty() {
        SearchResponse {
            status: "NOT-FOUND".into(),
            data: None,
        }
    } else {
        SearchResponse {
            status: "FOUND".into(),
            data: Some(hits),
        }
    };

    Ok(Json(response))
}
