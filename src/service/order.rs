use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Order, OrderItem, OrderStatus},
    repository::OrderRepositoryState,
    service::PizzaService,
};

/// OrderService
///
/// Creates orders against the live menu and drives their status lifecycle.
#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepositoryState,
    pizzas: PizzaService,
}

impl OrderService {
    pub fn new(repo: OrderRepositoryState, pizzas: PizzaService) -> Self {
        Self { repo, pizzas }
    }

    /// create_order
    ///
    /// Every item must name a pizza on the menu and carry a positive quantity.
    /// Nothing is persisted unless the whole order validates. The total is the
    /// sum of `price * quantity` over the items, priced at creation time.
    pub async fn create_order(&self, items: Vec<OrderItem>) -> Result<Order, AppError> {
        if items.is_empty() {
            return Err(AppError::Validation("an order needs at least one item".to_string()));
        }

        for item in &items {
            if item.quantity == 0 {
                return Err(AppError::Validation(format!(
                    "quantity for '{}' must be at least 1",
                    item.pizza_name
                )));
            }
            if !self.pizzas.exists(&item.pizza_name).await {
                return Err(AppError::InvalidPizza(item.pizza_name.clone()));
            }
        }

        let mut total_price = 0.0;
        for item in &items {
            // The pizza may have been deleted since the existence pass.
            let pizza = self
                .pizzas
                .get_pizza(&item.pizza_name)
                .await
                .ok_or_else(|| AppError::InvalidPizza(item.pizza_name.clone()))?;
            total_price += pizza.price * f64::from(item.quantity);
        }
        // A non-finite total would serialize as `null`.
        if !total_price.is_finite() {
            return Err(AppError::Validation(
                "order total exceeds the representable range".to_string(),
            ));
        }

        let order = Order {
            id: Uuid::new_v4(),
            items,
            status: OrderStatus::Placed,
            total_price,
            created_at: Utc::now(),
        };

        let order = self.repo.insert(order).await?;
        tracing::info!(order_id = %order.id, total = order.total_price, "order placed");
        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        self.repo
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))
    }

    pub async fn check_order_status(&self, id: Uuid) -> Result<OrderStatus, AppError> {
        Ok(self.get_order(id).await?.status)
    }

    /// cancel_order
    ///
    /// Customer cancel. Refused once the order is delivered or already cancelled.
    pub async fn cancel_order(&self, id: Uuid) -> Result<Order, AppError> {
        let order = self.repo.update_status(id, OrderStatus::cancel).await?;
        tracing::info!(order_id = %id, "order cancelled");
        Ok(order)
    }

    /// cancel_order_regardless_status
    ///
    /// Administrative force-cancel: skips the transition guard entirely.
    pub async fn cancel_order_regardless_status(&self, id: Uuid) -> Result<Order, AppError> {
        let order = self
            .repo
            .update_status(id, |_| Ok(OrderStatus::Cancelled))
            .await?;
        tracing::warn!(order_id = %id, "order force-cancelled by admin");
        Ok(order)
    }

    /// advance_order_status
    ///
    /// Moves the order one step towards delivery.
    pub async fn advance_order_status(&self, id: Uuid) -> Result<Order, AppError> {
        let order = self.repo.update_status(id, OrderStatus::advance).await?;
        tracing::info!(order_id = %id, status = %order.status, "order advanced");
        Ok(order)
    }
}
