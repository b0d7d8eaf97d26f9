//! Order Service - the order workflow

use axum_helpers::SessionUser;
use chrono::Utc;
use domain_products::ProductRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrderRequest, Order, OrderItem, OrderStatus, UpdateOrderRequest};
use crate::payment::{CURRENCY, PaymentGateway};
use crate::permissions::check_permissions;
use crate::repository::OrderRepository;

/// Order workflow over an order store, the product catalog and a payment
/// gateway.
pub struct OrderService<R, P, G>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    orders: Arc<R>,
    products: Arc<P>,
    payments: Arc<G>,
}

impl<R, P, G> Clone for OrderService<R, P, G>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            products: Arc::clone(&self.products),
            payments: Arc::clone(&self.payments),
        }
    }
}

impl<R, P, G> OrderService<R, P, G>
where
    R: OrderRepository,
    P: ProductRepository,
    G: PaymentGateway,
{
    /// `products` is shared with the catalog service.
    pub fn new(orders: R, products: Arc<P>, payments: G) -> Self {
        Self {
            orders: Arc::new(orders),
            products,
            payments: Arc::new(payments),
        }
    }

    /// Price the cart, obtain a payment intent and persist a pending order.
    ///
    /// Nothing is written unless the gateway succeeds.
    #[instrument(skip(self, requester, input), fields(user_id = %requester.user_id))]
    pub async fn create_order(
        &self,
        requester: &SessionUser,
        input: CreateOrderRequest,
    ) -> OrderResult<Order> {
        let cart = match input.items {
            Some(ref items) if !items.is_empty() => items,
            _ => return Err(OrderError::EmptyCart),
        };

        // Zero counts as missing, matching the public API contract.
        let (tax, shipping_fee) = match (input.tax, input.shipping_fee) {
            (Some(tax), Some(fee)) if tax != 0 && fee != 0 => (tax, fee),
            _ => return Err(OrderError::MissingCharges),
        };

        input.validate()?;

        let mut order_items = Vec::with_capacity(cart.len());
        let mut subtotal: i64 = 0;

        for item in cart {
            let product = self
                .products
                .get_by_id(item.product)
                .await?
                .ok_or(OrderError::ProductNotFound(item.product))?;

            let line_total = product
                .price
                .checked_mul(i64::from(item.amount))
                .ok_or_else(|| OrderError::InvalidInput("Order total is too large".to_string()))?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| OrderError::InvalidInput("Order total is too large".to_string()))?;

            order_items.push(OrderItem::snapshot(&product, item.amount));
        }

        let total = tax
            .checked_add(shipping_fee)
            .and_then(|charges| charges.checked_add(subtotal))
            .ok_or_else(|| OrderError::InvalidInput("Order total is too large".to_string()))?;

        let intent = self
            .payments
            .create_payment_intent(total, CURRENCY)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Payment intent creation failed"))?;

        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            order_items,
            subtotal,
            tax,
            shipping_fee,
            total,
            client_secret: intent.client_secret,
            payment_intent_id: None,
            status: OrderStatus::Pending,
            user: requester.user_id,
            created_at: now,
            updated_at: now,
        };

        let order = self.orders.create(order).await?;
        tracing::info!(order_id = %order.id, total, "Order placed");
        Ok(order)
    }

    /// Record the confirmed payment and mark the order paid.
    #[instrument(skip(self, requester, input), fields(user_id = %requester.user_id))]
    pub async fn update_order(
        &self,
        requester: &SessionUser,
        id: Uuid,
        input: UpdateOrderRequest,
    ) -> OrderResult<Order> {
        input.validate()?;

        let mut order = self.find_permitted(requester, id).await?;
        order.mark_paid(input.payment_intent_id);

        let order = self.orders.update(order).await?;
        tracing::info!(order_id = %order.id, "Order marked paid");
        Ok(order)
    }

    #[instrument(skip(self, requester), fields(user_id = %requester.user_id))]
    pub async fn get_single_order(&self, requester: &SessionUser, id: Uuid) -> OrderResult<Order> {
        self.find_permitted(requester, id).await
    }

    /// The requester's orders. An empty history is reported as `NoOrders`.
    #[instrument(skip(self, requester), fields(user_id = %requester.user_id))]
    pub async fn get_current_user_orders(&self, requester: &SessionUser) -> OrderResult<Vec<Order>> {
        let orders = self.orders.list_by_user(requester.user_id).await?;
        if orders.is_empty() {
            return Err(OrderError::NoOrders);
        }
        Ok(orders)
    }

    /// Every order. Callers restrict this to admins.
    #[instrument(skip(self))]
    pub async fn get_all_orders(&self) -> OrderResult<Vec<Order>> {
        self.orders.list_all().await
    }

    async fn find_permitted(&self, requester: &SessionUser, id: Uuid) -> OrderResult<Order> {
        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;

        check_permissions(requester, order.user)?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use crate::payment::{MockPaymentGateway, PaymentError, PaymentIntent};
    use crate::repository::{InMemoryOrderRepository, MockOrderRepository};
    use axum_helpers::Role;
    use domain_products::{
        CreateProduct, InMemoryProductRepository, Product, ProductService, UpdateProduct,
    };
    use mockall::predicate::eq;

    fn customer() -> SessionUser {
        SessionUser::new(Uuid::now_v7(), "customer", Role::User)
    }

    fn admin() -> SessionUser {
        SessionUser::new(Uuid::now_v7(), "admin", Role::Admin)
    }

    fn product(name: &str, price: i64) -> Product {
        Product::new(CreateProduct {
            name: name.to_string(),
            price,
            image: format!("/uploads/{name}.jpeg"),
        })
    }

    async fn catalog(products: &[Product]) -> Arc<InMemoryProductRepository> {
        let repo = InMemoryProductRepository::new();
        for p in products {
            repo.insert(p.clone()).await;
        }
        Arc::new(repo)
    }

    fn request(items: Vec<CartItem>, tax: Option<i64>, shipping_fee: Option<i64>) -> CreateOrderRequest {
        CreateOrderRequest {
            items: Some(items),
            tax,
            shipping_fee,
        }
    }

    fn ok_gateway(expected_total: i64) -> MockPaymentGateway {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .with(eq(expected_total), eq(CURRENCY))
            .times(1)
            .returning(|amount, _| {
                Ok(PaymentIntent {
                    client_secret: "cs_test".to_string(),
                    amount,
                })
            });
        gateway
    }

    #[tokio::test]
    async fn test_create_order_computes_totals_and_snapshots() {
        let a = product("a", 1000);
        let b = product("b", 250);
        let products = catalog(&[a.clone(), b.clone()]).await;
        let service = OrderService::new(InMemoryOrderRepository::new(), products, ok_gateway(2999));

        let user = customer();
        let order = service
            .create_order(
                &user,
                request(
                    vec![
                        CartItem { product: a.id, amount: 2 },
                        CartItem { product: b.id, amount: 3 },
                    ],
                    Some(199),
                    Some(50),
                ),
            )
            .await
            .unwrap();

        assert_eq!(order.subtotal, 2750);
        assert_eq!(order.total, 2999);
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[1].price, 250);
        assert_eq!(order.client_secret, "cs_test");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user, user.user_id);
    }

    #[tokio::test]
    async fn test_create_order_empty_cart() {
        let service = OrderService::new(
            MockOrderRepository::new(),
            catalog(&[]).await,
            MockPaymentGateway::new(),
        );

        for input in [
            CreateOrderRequest::default(),
            request(vec![], Some(1), Some(1)),
        ] {
            let result = service.create_order(&customer(), input).await;
            assert!(matches!(result, Err(OrderError::EmptyCart)));
        }
    }

    #[tokio::test]
    async fn test_create_order_missing_or_zero_charges() {
        let p = product("p", 100);
        let service = OrderService::new(
            MockOrderRepository::new(),
            catalog(&[p.clone()]).await,
            MockPaymentGateway::new(),
        );
        let items = || vec![CartItem { product: p.id, amount: 1 }];

        for input in [
            request(items(), None, Some(10)),
            request(items(), Some(10), None),
            request(items(), Some(10), Some(0)),
            request(items(), Some(0), Some(10)),
        ] {
            let result = service.create_order(&customer(), input).await;
            assert!(matches!(result, Err(OrderError::MissingCharges)));
        }
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_names_id() {
        let missing = Uuid::now_v7();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment_intent().never();
        let mut orders = MockOrderRepository::new();
        orders.expect_create().never();

        let service = OrderService::new(orders, catalog(&[]).await, gateway);
        let result = service
            .create_order(
                &customer(),
                request(vec![CartItem { product: missing, amount: 1 }], Some(1), Some(1)),
            )
            .await;

        assert!(matches!(result, Err(OrderError::ProductNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_payment_failure_persists_nothing() {
        let p = product("p", 100);
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .times(1)
            .returning(|_, _| Err(PaymentError::Unavailable("timeout".to_string())));
        let mut orders = MockOrderRepository::new();
        orders.expect_create().never();

        let service = OrderService::new(orders, catalog(&[p.clone()]).await, gateway);
        let result = service
            .create_order(
                &customer(),
                request(vec![CartItem { product: p.id, amount: 1 }], Some(1), Some(1)),
            )
            .await;

        assert!(matches!(result, Err(OrderError::PaymentGateway(_))));
    }

    #[tokio::test]
    async fn test_overflow_is_invalid_input() {
        let p = product("p", i64::MAX);
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment_intent().never();

        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog(&[p.clone()]).await,
            gateway,
        );
        let result = service
            .create_order(
                &customer(),
                request(vec![CartItem { product: p.id, amount: 2 }], Some(1), Some(1)),
            )
            .await;

        assert!(matches!(result, Err(OrderError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_price_change_does_not_touch_existing_order() {
        let p = product("p", 500);
        let products = catalog(&[p.clone()]).await;
        let catalog_service = ProductService::from_shared(Arc::clone(&products));
        let orders = InMemoryOrderRepository::new();
        let service = OrderService::new(orders, products, ok_gateway(500 + 1 + 1));

        let user = customer();
        let order = service
            .create_order(
                &user,
                request(vec![CartItem { product: p.id, amount: 1 }], Some(1), Some(1)),
            )
            .await
            .unwrap();

        catalog_service
            .update_product(
                p.id,
                UpdateProduct {
                    price: Some(9999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.get_single_order(&user, order.id).await.unwrap();
        assert_eq!(stored.order_items[0].price, 500);
        assert_eq!(stored.total, 502);
    }

    #[tokio::test]
    async fn test_update_order_marks_paid_for_owner() {
        let p = product("p", 100);
        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog(&[p.clone()]).await,
            ok_gateway(102),
        );
        let user = customer();
        let order = service
            .create_order(
                &user,
                request(vec![CartItem { product: p.id, amount: 1 }], Some(1), Some(1)),
            )
            .await
            .unwrap();

        let paid = service
            .update_order(
                &user,
                order.id,
                UpdateOrderRequest {
                    payment_intent_id: "pi_123".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(paid.status, OrderStatus::Paid);
        assert_eq!(paid.payment_intent_id.as_deref(), Some("pi_123"));
        assert!(paid.updated_at >= order.updated_at);
    }

    #[tokio::test]
    async fn test_update_order_forbidden_for_stranger_and_missing_is_not_found() {
        let p = product("p", 100);
        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog(&[p.clone()]).await,
            ok_gateway(102),
        );
        let order = service
            .create_order(
                &customer(),
                request(vec![CartItem { product: p.id, amount: 1 }], Some(1), Some(1)),
            )
            .await
            .unwrap();

        let update = || UpdateOrderRequest {
            payment_intent_id: "pi_x".to_string(),
        };

        let stranger = service.update_order(&customer(), order.id, update()).await;
        assert!(matches!(stranger, Err(OrderError::Forbidden)));

        let untouched = service.get_single_order(&admin(), order.id).await.unwrap();
        assert_eq!(untouched.status, OrderStatus::Pending);
        assert_eq!(untouched.payment_intent_id, None);

        let missing = service.update_order(&customer(), Uuid::now_v7(), update()).await;
        assert!(matches!(missing, Err(OrderError::OrderNotFound(_))));

        let by_admin = service.update_order(&admin(), order.id, update()).await;
        assert!(by_admin.is_ok());
    }

    #[tokio::test]
    async fn test_current_user_orders_empty_is_no_orders() {
        let mut orders = MockOrderRepository::new();
        let user = customer();
        orders
            .expect_list_by_user()
            .with(eq(user.user_id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = OrderService::new(orders, catalog(&[]).await, MockPaymentGateway::new());
        let result = service.get_current_user_orders(&user).await;
        assert!(matches!(result, Err(OrderError::NoOrders)));
    }

    #[tokio::test]
    async fn test_get_all_orders_returns_everything() {
        let p = product("p", 100);
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment_intent()
            .times(2)
            .returning(|amount, _| {
                Ok(PaymentIntent {
                    client_secret: "cs".to_string(),
                    amount,
                })
            });
        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog(&[p.clone()]).await,
            gateway,
        );

        for _ in 0..2 {
            service
                .create_order(
                    &customer(),
                    request(vec![CartItem { product: p.id, amount: 1 }], Some(1), Some(1)),
                )
                .await
                .unwrap();
        }

        assert_eq!(service.get_all_orders().await.unwrap().len(), 2);
    }
}
