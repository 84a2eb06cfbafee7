use crate::{
    error::AppError,
    models::{Order, OrderStatus, Pizza, User},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository Traits
///
/// Abstract contracts for the three keyed stores. Services only ever talk to
/// these traits, so the in-memory implementations below can be swapped for a
/// durable backend without touching the service or HTTP layers.
///
/// **Send + Sync + async_trait** are required to make the trait objects
/// (`Arc<dyn ...>`) shareable across Axum's asynchronous task boundaries.
///
/// Every method that checks and then writes does both under a single lock
/// acquisition, so concurrent callers can never produce duplicate keys or
/// lose a status update.
#[async_trait]
pub trait PizzaRepository: Send + Sync {
    async fn list(&self) -> Vec<Pizza>;
    async fn get(&self, name: &str) -> Option<Pizza>;
    async fn contains(&self, name: &str) -> bool;
    /// Fails with `DuplicateKey` if a pizza with the same name is stored.
    async fn insert(&self, pizza: Pizza) -> Result<Pizza, AppError>;
    /// Returns the removed pizza, or `None` if the name was unknown.
    async fn remove(&self, name: &str) -> Option<Pizza>;
}

/// A status transition applied atomically by [`OrderRepository::update_status`].
pub type StatusTransition = fn(OrderStatus) -> Result<OrderStatus, AppError>;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order, AppError>;
    async fn get(&self, id: Uuid) -> Option<Order>;
    async fn count(&self) -> usize;
    /// Reads the current status, computes the next one with `transition` and
    /// stores it, all while holding the write lock.
    async fn update_status(
        &self,
        id: Uuid,
        transition: StatusTransition,
    ) -> Result<Order, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, username: &str) -> Option<User>;
    /// Fails with `DuplicateKey` if the username is taken.
    async fn insert(&self, user: User) -> Result<User, AppError>;
}

pub type PizzaRepositoryState = Arc<dyn PizzaRepository>;
pub type OrderRepositoryState = Arc<dyn OrderRepository>;
pub type UserRepositoryState = Arc<dyn UserRepository>;

// --- In-memory implementations ---

/// InMemoryPizzaRepository
///
/// The menu, keyed by pizza name. Volatile: the contents die with the process.
#[derive(Default)]
pub struct InMemoryPizzaRepository {
    pizzas: RwLock<HashMap<String, Pizza>>,
}

impl InMemoryPizzaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository preloaded with `pizzas`. Later duplicates overwrite
    /// earlier ones.
    pub fn with_menu(pizzas: impl IntoIterator<Item = Pizza>) -> Self {
        let map = pizzas
            .into_iter()
            .map(|pizza| (pizza.name.clone(), pizza))
            .collect();
        Self {
            pizzas: RwLock::new(map),
        }
    }
}

#[async_trait]
impl PizzaRepository for InMemoryPizzaRepository {
    async fn list(&self) -> Vec<Pizza> {
        self.pizzas.read().await.values().cloned().collect()
    }

    async fn get(&self, name: &str) -> Option<Pizza> {
        self.pizzas.read().await.get(name).cloned()
    }

    async fn contains(&self, name: &str) -> bool {
        self.pizzas.read().await.contains_key(name)
    }

    async fn insert(&self, pizza: Pizza) -> Result<Pizza, AppError> {
        let mut pizzas = self.pizzas.write().await;
        if pizzas.contains_key(&pizza.name) {
            return Err(AppError::DuplicateKey(format!("pizza '{}'", pizza.name)));
        }
        pizzas.insert(pizza.name.clone(), pizza.clone());
        Ok(pizza)
    }

    async fn remove(&self, name: &str) -> Option<Pizza> {
        self.pizzas.write().await.remove(name)
    }
}

/// InMemoryOrderRepository
///
/// Orders keyed by id. Orders are never removed.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: Order) -> Result<Order, AppError> {
        let mut orders = self.orders.write().await;
        // v4 collisions are not expected, but an existing order must never be replaced.
        if orders.contains_key(&order.id) {
            return Err(AppError::DuplicateKey(format!("order {}", order.id)));
        }
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Option<Order> {
        self.orders.read().await.get(&id).cloned()
    }

    async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    async fn update_status(
        &self,
        id: Uuid,
        transition: StatusTransition,
    ) -> Result<Order, AppError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;
        order.status = transition(order.status)?;
        Ok(order.clone())
    }
}

/// InMemoryUserRepository
///
/// Accounts keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::DuplicateKey(format!("user '{}'", user.username)));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}
