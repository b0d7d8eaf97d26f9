use chrono::{DateTime, Utc};
use domain_products::Product;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle. Orders start `pending` and become `paid` once the
/// client confirms the payment intent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
}

/// One cart line as sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CartItem {
    pub product: Uuid,
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: u32,
}

/// Product snapshot frozen into an order. Later catalog edits do not
/// change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product: Uuid,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub amount: u32,
}

impl OrderItem {
    pub fn snapshot(product: &Product, amount: u32) -> Self {
        Self {
            product: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            amount,
        }
    }
}

/// A placed order. All money fields are minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub order_items: Vec<OrderItem>,
    pub subtotal: i64,
    pub tax: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub client_secret: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Owner
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Mark the order paid. Repeated calls overwrite the previous intent id.
    pub fn mark_paid(&mut self, payment_intent_id: String) {
        self.payment_intent_id = Some(payment_intent_id);
        self.status = OrderStatus::Paid;
        self.updated_at = Utc::now();
    }
}

/// `POST /orders` body. Every field is optional on the wire so that an
/// empty cart or missing charges get their own error instead of a parse
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(nested)]
    pub items: Option<Vec<CartItem>>,
    #[validate(range(min = 0, message = "Tax cannot be negative"))]
    pub tax: Option<i64>,
    #[validate(range(min = 0, message = "Shipping fee cannot be negative"))]
    pub shipping_fee: Option<i64>,
}

/// `PATCH /orders/{id}` body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "Payment intent id is required"))]
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOrdersResponse {
    pub user_orders: Vec<Order>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: Order,
    pub client_secret: String,
}
