use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

// --- Menu ---

/// Pizza
///
/// A single menu entry. The `name` is the unique key of the menu; a pizza is
/// never updated in place, only added or removed by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Pizza {
    #[schema(example = "Margherita")]
    pub name: String,
    #[schema(example = 8.5)]
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

// --- Orders ---

/// OrderStatus
///
/// Lifecycle marker of an order. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum OrderStatus {
    Placed,
    InPreparation,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// cancel
    ///
    /// The customer-facing cancel transition. Any non-terminal order can be
    /// cancelled; a delivered or already cancelled order cannot.
    pub fn cancel(self) -> Result<OrderStatus, AppError> {
        if self.is_terminal() {
            return Err(AppError::InvalidTransition {
                from: self,
                action: "cancel",
            });
        }
        Ok(OrderStatus::Cancelled)
    }

    /// advance
    ///
    /// Moves an order one step along the fulfillment path:
    /// PLACED -> IN_PREPARATION -> OUT_FOR_DELIVERY -> DELIVERED.
    pub fn advance(self) -> Result<OrderStatus, AppError> {
        let next = match self {
            OrderStatus::Placed => OrderStatus::InPreparation,
            OrderStatus::InPreparation => OrderStatus::OutForDelivery,
            OrderStatus::OutForDelivery => OrderStatus::Delivered,
            OrderStatus::Delivered | OrderStatus::Cancelled => {
                return Err(AppError::InvalidTransition {
                    from: self,
                    action: "advance",
                });
            }
        };
        Ok(next)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// OrderItem
///
/// One line of an order: a menu entry referenced by name and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct OrderItem {
    #[schema(example = "Margherita")]
    pub pizza_name: String,
    #[schema(example = 2)]
    pub quantity: u32,
}

/// Order
///
/// A placed order. `total_price` is computed once at creation from the menu
/// prices in effect at that moment and is not recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_price: f64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Users ---

/// Role
///
/// Authorization tier carried inside the auth token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Whether a caller holding `self` may use a route requiring `required`.
    /// Admins satisfy every requirement.
    pub fn satisfies(self, required: Role) -> bool {
        self == Role::Admin || self == required
    }
}

/// User
///
/// Stored account record. The password hash is an argon2 PHC string and is
/// kept out of every serialized form; responses use [`UserView`].
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// UserView
///
/// Public projection of a [`User`] returned by the registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserView {
    pub username: String,
    pub role: Role,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            role: user.role,
        }
    }
}

/// --- Request Payloads (Input Schemas) ---

/// CreateOrderRequest
///
/// Input payload for POST /order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
}

/// Credentials
///
/// Shared body of POST /user/register and POST /user/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Credentials {
    #[schema(example = "mario")]
    pub username: String,
    #[schema(example = "its-a-me")]
    pub password: String,
}

/// --- Responses (Output Schemas) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct OrderStatusResponse {
    pub id: Uuid,
    pub status: OrderStatus,
}

/// TokenResponse
///
/// Returned by a successful login. The token goes into
/// `Authorization: Bearer <token>` on admin routes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TokenResponse {
    pub token: String,
}

/// ErrorResponse
///
/// Body attached to every non-2xx response produced by [`AppError`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `NOT_FOUND` or `INVALID_PIZZA`.
    pub error: String,
    pub message: String,
}
