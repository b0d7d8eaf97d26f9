//! HTTP handlers for the product catalog
//!
//! Reads are public. Creating and updating products requires an admin
//! session.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    authorize_roles,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AppError, AuthUser, Role, SessionManager, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CreateProduct, Product, ProductListResponse, ProductResponse, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductListResponse, ProductResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus the session verifier used by `AuthUser`.
pub struct ProductsState<R: ProductRepository> {
    pub service: Arc<ProductService<R>>,
    pub sessions: SessionManager,
}

impl<R: ProductRepository> Clone for ProductsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R: ProductRepository> FromRef<ProductsState<R>> for SessionManager {
    fn from_ref(state: &ProductsState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Create the products router
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    sessions: SessionManager,
) -> Router {
    let state = ProductsState {
        service: Arc::new(service),
        sessions,
    };

    Router::new()
        .route("/", get(list_products::<R>).post(create_product::<R>))
        .route("/{id}", get(get_product::<R>).patch(update_product::<R>))
        .with_state(state)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
) -> Result<Json<ProductListResponse>, AppError> {
    let products = state.service.list_products().await?;
    let count = products.len();
    Ok(Json(ProductListResponse { products, count }))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    AuthUser(user): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    authorize_roles(&user, &[Role::Admin])?;

    let product = state.service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.service.get_product(id).await?;
    Ok(Json(ProductResponse { product }))
}

/// Update a product (admin only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<ProductResponse>, AppError> {
    authorize_roles(&user, &[Role::Admin])?;

    let product = state.service.update_product(id, input).await?;
    Ok(Json(ProductResponse { product }))
}
