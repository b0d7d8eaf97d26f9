//! Orders Domain
//!
//! The order workflow: a cart is priced against live catalog records, a
//! payment intent is obtained from the gateway, and only then is the order
//! written. Reads and payment confirmation are limited to the owner or an
//! admin.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, session + role checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────────┐
//! │   Service   │ ──▶ │ ProductRepository │  (domain_products)
//! └──────┬──────┘     ├───────────────────┤
//!        │            │  PaymentGateway   │
//! ┌──────▼──────┐     └───────────────────┘
//! │ Repository  │  ← Data access (trait + in-memory + MongoDB)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod payment;
pub mod permissions;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    CartItem, CreateOrderRequest, CreateOrderResponse, Order, OrderItem, OrderListResponse,
    OrderResponse, OrderStatus, UpdateOrderRequest, UserOrdersResponse,
};
pub use mongodb::MongoOrderRepository;
pub use payment::{CURRENCY, FakePaymentGateway, PaymentError, PaymentGateway, PaymentIntent};
pub use permissions::check_permissions;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
