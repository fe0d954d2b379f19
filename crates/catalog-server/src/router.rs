//! Axum router construction.
//!
//! Builds the full application router with the item routes, the health
//! probe, the OpenAPI document, and the middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::error_envelope::error_envelope_middleware;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::items::list_items,
        routes::items::create_item,
        routes::items::get_item,
        routes::items::update_item,
        routes::items::delete_item,
        routes::items::search_items,
    ),
    components(schemas(
        catalog_core::ItemForm,
        catalog_db::ItemSummary,
        routes::items::ItemResponse,
        routes::items::ItemFoundResponse,
        routes::items::ItemWriteResponse,
        routes::items::SearchResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route(
            "/items/search/{keyword}",
            get(routes::items::search_items),
        )
        .route(
            "/items/{id}",
            get(routes::items::get_item)
                .put(routes::items::update_item)
                .patch(routes::items::update_item)
                .delete(routes::items::delete_item),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(ctx.config.api.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            ctx.clone(),
            error_envelope_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use catalog_core::config::Config;
    use catalog_db::pool::init_memory_pool;
    use catalog_db::SqliteItemStore;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(config: Config) -> Router {
        let store = Arc::new(SqliteItemStore::new(init_memory_pool().unwrap()));
        build_router(AppContext::new(store, config))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app(Config::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn error_body_carries_request_id() {
        let response = app(Config::default())
            .oneshot(
                Request::get("/api/items/not-a-uuid")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-request-id"], "req-42");

        let json = body_json(response).await;
        assert_eq!(json["status"], "NOT-FOUND");
        assert_eq!(json["request_id"], "req-42");
    }

    #[tokio::test]
    async fn legacy_mode_rewrites_validation_errors() {
        let mut config = Config::default();
        config.api.legacy_status_codes = true;

        let response = app(config)
            .oneshot(
                Request::post("/api/items")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"","description":"d","price":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "Varidation Error");
    }

    #[tokio::test]
    async fn undecodable_keyword_is_json_validation_error() {
        let response = app(Config::default())
            .oneshot(
                Request::get("/api/items/search/%FF")
                    .header("x-request-id", "req-ff")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()["content-type"], "application/json");

        let json = body_json(response).await;
        assert_eq!(json["status"], "Validation Error");
        assert_eq!(json["request_id"], "req-ff");
    }

    #[tokio::test]
    async fn undecodable_id_is_json_not_found() {
        for method in ["GET", "PUT", "DELETE"] {
            let response = app(Config::default())
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/api/items/%FF")
                        .header("content-type", "application/json")
                        .body(Body::from(r#"{"name":"n","description":"d","price":1}"#))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");

            let json = body_json(response).await;
            assert_eq!(json["status"], "NOT-FOUND");
        }
    }

    #[tokio::test]
    async fn legacy_mode_covers_path_errors() {
        let mut config = Config::default();
        config.api.legacy_status_codes = true;

        let response = app(config)
            .oneshot(
                Request::get("/api/items/search/%FF")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "Varidation Error");
    }

    #[tokio::test]
    async fn openapi_document_lists_item_paths() {
        let response = app(Config::default())
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["paths"]["/api/items"].is_object());
        assert!(json["paths"]["/api/items/search/{keyword}"].is_object());
    }
}
