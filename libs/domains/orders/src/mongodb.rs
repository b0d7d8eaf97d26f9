//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use database::mongodb::uuid_to_bson;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::Order;
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "orders")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Order>(collection_name),
        }
    }

    /// Index for "my orders" lookups.
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "user": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": uuid_to_bson(id) }
    }

    fn user_filter(user_id: Uuid) -> Document {
        doc! { "user": uuid_to_bson(user_id) }
    }

    async fn find_newest_first(&self, filter: Document) -> OrderResult<Vec<Order>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;

        tracing::info!(user_id = %order.user, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(Self::id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> OrderResult<Vec<Order>> {
        self.find_newest_first(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>> {
        self.find_newest_first(Self::user_filter(user_id)).await
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn update(&self, order: Order) -> OrderResult<Order> {
        let result = self
            .collection
            .replace_one(Self::id_filter(order.id), &order)
            .await?;

        if result.matched_count == 0 {
            return Err(OrderError::OrderNotFound(order.id));
        }

        tracing::info!("Order updated successfully");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use chrono::Utc;
    use mongodb::bson::{from_slice, to_raw_document_buf};

    fn order() -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::now_v7(),
            order_items: vec![],
            subtotal: 2000,
            tax: 100,
            shipping_fee: 500,
            total: 2600,
            client_secret: "pi_secret".to_string(),
            payment_intent_id: None,
            status: OrderStatus::Pending,
            user: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        }
    }

    fn stored(order: &Order) -> Document {
        let raw = to_raw_document_buf(order).unwrap();
        from_slice(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_id_filter_matches_stored_id() {
        let order = order();
        let filter = MongoOrderRepository::id_filter(order.id);

        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get("_id"), stored(&order).get("_id"));
    }

    #[test]
    fn test_user_filter_matches_stored_owner() {
        let order = order();
        let filter = MongoOrderRepository::user_filter(order.user);

        assert_eq!(filter.get("user"), stored(&order).get("user"));
        assert_ne!(filter.get("user"), stored(&order).get("_id"));
    }
}
