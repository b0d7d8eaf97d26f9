use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::Order;

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order
    async fn create(&self, order: Order) -> OrderResult<Order>;

    /// Get an order by ID
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Every order, newest first
    async fn list_all(&self) -> OrderResult<Vec<Order>>;

    /// Orders owned by `user_id`, newest first
    async fn list_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>>;

    /// Replace a stored order with `order`
    async fn update(&self, order: Order) -> OrderResult<Order>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.orders.write().await.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, user_id = %order.user, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await.values().cloned().collect();
        Ok(newest_first(orders))
    }

    async fn list_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.user == user_id)
            .cloned()
            .collect();
        Ok(newest_first(orders))
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;

        if !orders.contains_key(&order.id) {
            return Err(OrderError::OrderNotFound(order.id));
        }
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, "Updated order");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use chrono::Utc;

    fn order_for(user: Uuid) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::now_v7(),
            order_items: vec![],
            subtotal: 1000,
            tax: 100,
            shipping_fee: 500,
            total: 1600,
            client_secret: "secret".to_string(),
            payment_intent_id: None,
            status: OrderStatus::Pending,
            user,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_by_user_filters_owner() {
        let repo = InMemoryOrderRepository::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        repo.create(order_for(alice)).await.unwrap();
        repo.create(order_for(alice)).await.unwrap();
        repo.create(order_for(bob)).await.unwrap();

        assert_eq!(repo.list_by_user(alice).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_user(bob).await.unwrap().len(), 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        let result = repo.update(order_for(Uuid::now_v7())).await;
        assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
    }
}
