//! HTTP handlers for the order workflow
//!
//! Every route needs a session. Listing all orders is admin-only; single
//! order reads and updates are owner-or-admin.

use axum::{
    Json, Router,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use axum_helpers::{
    AppError, AuthUser, Role, SessionManager, UuidPath, ValidatedJson, authorize_roles,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        ServiceUnavailableResponse, UnauthorizedResponse,
    },
};
use domain_products::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CartItem, CreateOrderRequest, CreateOrderResponse, Order, OrderItem, OrderListResponse,
    OrderResponse, OrderStatus, UpdateOrderRequest, UserOrdersResponse,
};
use crate::payment::PaymentGateway;
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the orders endpoints
#[derive(OpenApi)]
#[openapi(
    paths(get_all_orders, create_order, show_current_user_orders, get_single_order, update_order),
    components(
        schemas(
            Order, OrderItem, OrderStatus, CartItem, CreateOrderRequest, UpdateOrderRequest,
            OrderListResponse, UserOrdersResponse, OrderResponse, CreateOrderResponse
        ),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order placement and retrieval")
    )
)]
pub struct ApiDoc;

pub struct OrdersState<R, P, G>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    pub service: Arc<OrderService<R, P, G>>,
    pub sessions: SessionManager,
}

impl<R, P, G> Clone for OrdersState<R, P, G>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R, P, G> FromRef<OrdersState<R, P, G>> for SessionManager
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    fn from_ref(state: &OrdersState<R, P, G>) -> Self {
        state.sessions.clone()
    }
}

/// Create the orders router
pub fn router<R, P, G>(service: OrderService<R, P, G>, sessions: SessionManager) -> Router
where
    R: OrderRepository + 'static,
    P: ProductRepository + 'static,
    G: PaymentGateway + 'static,
{
    let state = OrdersState {
        service: Arc::new(service),
        sessions,
    };

    Router::new()
        .route(
            "/",
            get(get_all_orders::<R, P, G>).post(create_order::<R, P, G>),
        )
        .route("/showAllMyOrders", get(show_current_user_orders::<R, P, G>))
        .route(
            "/{id}",
            get(get_single_order::<R, P, G>).patch(update_order::<R, P, G>),
        )
        .with_state(state)
}

/// List every order (admin only)
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders", body = OrderListResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_orders<R, P, G>(
    State(state): State<OrdersState<R, P, G>>,
    AuthUser(user): AuthUser,
) -> Result<Json<OrderListResponse>, AppError>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    authorize_roles(&user, &[Role::Admin])?;

    let orders = state.service.get_all_orders().await?;
    let count = orders.len();
    Ok(Json(OrderListResponse { orders, count }))
}

/// Place an order for the current user
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R, P, G>(
    State(state): State<OrdersState<R, P, G>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    // Field rules run inside the service, after the cart and charge checks.
    let Json(input) = payload?;
    let order = state.service.create_order(&user, input).await?;
    let client_secret = order.client_secret.clone();

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order,
            client_secret,
        }),
    ))
}

/// List the current user's orders
#[utoipa::path(
    get,
    path = "/showAllMyOrders",
    tag = "Orders",
    responses(
        (status = 200, description = "Orders of the current user", body = UserOrdersResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn show_current_user_orders<R, P, G>(
    State(state): State<OrdersState<R, P, G>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserOrdersResponse>, AppError>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    let user_orders = state.service.get_current_user_orders(&user).await?;
    let count = user_orders.len();
    Ok(Json(UserOrdersResponse { user_orders, count }))
}

/// Get one order (owner or admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_single_order<R, P, G>(
    State(state): State<OrdersState<R, P, G>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
) -> Result<Json<OrderResponse>, AppError>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    let order = state.service.get_single_order(&user, id).await?;
    Ok(Json(OrderResponse { order }))
}

/// Confirm payment of an order (owner or admin)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order marked paid", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R, P, G>(
    State(state): State<OrdersState<R, P, G>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, AppError>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    let order = state.service.update_order(&user, id, input).await?;
    Ok(Json(OrderResponse { order }))
}
