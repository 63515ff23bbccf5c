//! HTTP handlers for the products API

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{ProductDto, ProductInput, ProductQuery, ProductSearch};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "Products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        search_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto, ProductInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Products in the requested order", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<Vec<ProductDto>>> {
    let products = service.list(query.sort.as_deref()).await?;
    Ok(Json(products))
}

/// Find products by exact name
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(ProductSearch),
    responses(
        (status = 200, description = "Products with this name; empty without `name`", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(search): Query<ProductSearch>,
) -> ProductResult<Json<Vec<ProductDto>>> {
    let products = match search.name {
        Some(name) => service.get_by_name(&name).await?,
        None => Vec::new(),
    };
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductDto,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({
        "name": product.name,
        "price": product.price,
    }))
    .log();

    // Relative to wherever the router is mounted
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductDto>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Replace a product's name and price
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<ProductDto>> {
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Delete a product. Unknown ids also return 204.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete(id).await?;

    AuditEvent::new(
        "product.delete",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}
