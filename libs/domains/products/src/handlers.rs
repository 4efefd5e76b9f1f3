//! HTTP handlers for the catalog API

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    ApiResponse, Created, PathParam, QueryParams, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, ListQueryParams, ProductDetail, ProductListItem, ProductListResult,
    SortOption, UpdateProduct, ViewMode,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_by_category,
    ),
    components(
        schemas(
            ProductListItem, ProductDetail, ProductListResult,
            CreateProduct, UpdateProduct, SortOption, ViewMode
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/category/{category}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List active products, featured first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListQueryParams),
    responses(
        (status = 200, description = "One page of products", body = ApiResponse<ProductListResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(params): QueryParams<ListQueryParams>,
) -> ProductResult<ApiResponse<ProductListResult>> {
    let result = service.list_products(params).await?;
    Ok(ApiResponse::ok(result))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Created<ProductDetail>> {
    let product = service.create_product(input).await?;
    Ok(Created(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParam(id): PathParam<String>,
) -> ProductResult<ApiResponse<ProductDetail>> {
    let product = service.get_product(&id).await?;
    Ok(ApiResponse::ok(product))
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParam(id): PathParam<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<ApiResponse<ProductDetail>> {
    let product = service.update_product(&id, input).await?;
    Ok(ApiResponse::ok(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParam(id): PathParam<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List active products in one category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Products",
    params(
        ("category" = String, Path, description = "Exact, case-sensitive category name"),
        ListQueryParams
    ),
    responses(
        (status = 200, description = "One page of products in the category", body = ApiResponse<ProductListResult>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParam(category): PathParam<String>,
    QueryParams(params): QueryParams<ListQueryParams>,
) -> ProductResult<ApiResponse<ProductListResult>> {
    let result = service.list_by_category(&category, params).await?;
    Ok(ApiResponse::ok(result))
}
