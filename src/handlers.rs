use crate::{
    AppState,
    auth::Claims,
    error::AppError,
    extract::{AppJson, OrderId},
    models::{
        CreateOrderRequest, Credentials, ErrorResponse, Order, OrderStatusResponse, Pizza,
        TokenResponse, UserView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// --- Menu ---

/// get_menu
///
/// [Public Route] Lists every pizza currently on the menu.
#[utoipa::path(
    get,
    path = "/pizza",
    responses((status = 200, description = "Menu", body = [Pizza]))
)]
pub async fn get_menu(State(state): State<AppState>) -> Json<Vec<Pizza>> {
    Json(state.pizzas.get_menu().await)
}

/// add_pizza_to_menu
///
/// [Admin Route] Adds a new pizza. Names are unique; a pizza cannot be edited
/// after creation, only deleted and re-added.
#[utoipa::path(
    post,
    path = "/pizza",
    request_body = Pizza,
    responses(
        (status = 201, description = "Added", body = Pizza),
        (status = 400, description = "Invalid definition", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 409, description = "Name already on the menu", body = ErrorResponse)
    )
)]
pub async fn add_pizza_to_menu(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<Pizza>,
) -> Result<(StatusCode, Json<Pizza>), AppError> {
    let pizza = state.pizzas.add_pizza_to_menu(payload).await?;
    tracing::debug!(admin = %claims.sub, pizza = %pizza.name, "menu updated");
    Ok((StatusCode::CREATED, Json(pizza)))
}

/// delete_pizza_from_menu
///
/// [Admin Route] Removes a pizza. Orders already referencing it are unaffected.
#[utoipa::path(
    delete,
    path = "/pizza/{name}",
    params(("name" = String, Path, description = "Pizza name")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not on the menu", body = ErrorResponse)
    )
)]
pub async fn delete_pizza_from_menu(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    state.pizzas.delete_pizza_from_menu(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Orders ---

/// create_order
///
/// [Public Route] Places an order. Every item must reference a pizza on the
/// menu; the total price is computed server-side.
#[utoipa::path(
    post,
    path = "/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Placed", body = Order),
        (status = 400, description = "Unknown pizza or empty order", body = ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.orders.create_order(payload.items).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// check_order_status
///
/// [Public Route] Returns the current lifecycle status of an order.
#[utoipa::path(
    get,
    path = "/order/status/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Status", body = OrderStatusResponse),
        (status = 404, description = "Unknown order", body = ErrorResponse)
    )
)]
pub async fn check_order_status(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<OrderStatusResponse>, AppError> {
    let status = state.orders.check_order_status(id).await?;
    Ok(Json(OrderStatusResponse { id, status }))
}

/// cancel_order
///
/// [Public Route] Customer cancel. Refused with 409 once the order is
/// delivered or already cancelled.
#[utoipa::path(
    put,
    path = "/order/cancel/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Cancelled", body = Order),
        (status = 404, description = "Unknown order", body = ErrorResponse),
        (status = 409, description = "Order can no longer be cancelled", body = ErrorResponse)
    )
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.cancel_order(id).await?))
}

/// cancel_order_regardless_status
///
/// [Admin Route] Force-cancels an order from any status.
#[utoipa::path(
    put,
    path = "/order/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Cancelled", body = Order),
        (status = 404, description = "Unknown order", body = ErrorResponse)
    )
)]
pub async fn cancel_order_regardless_status(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.cancel_order_regardless_status(id).await?))
}

/// get_order
///
/// [Admin Route] Full order details, including items and total.
#[utoipa::path(
    get,
    path = "/order/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "Unknown order", body = ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.get_order(id).await?))
}

/// advance_order_status
///
/// [Admin Route] Moves an order one step along
/// PLACED -> IN_PREPARATION -> OUT_FOR_DELIVERY -> DELIVERED.
#[utoipa::path(
    put,
    path = "/order/advance/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Advanced", body = Order),
        (status = 404, description = "Unknown order", body = ErrorResponse),
        (status = 409, description = "Order is in a terminal status", body = ErrorResponse)
    )
)]
pub async fn advance_order_status(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.advance_order_status(id).await?))
}

// --- Users ---

/// register_user
///
/// [Public Route] Creates a `USER` account. Admin accounts are only created
/// from configuration at startup.
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = Credentials,
    responses(
        (status = 201, description = "Registered", body = UserView),
        (status = 409, description = "Username taken", body = ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let user = state
        .users
        .register_user(&payload.username, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// login
///
/// [Public Route] Exchanges credentials for a signed bearer token.
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.users.login(&payload.username, &payload.password).await?;
    Ok(Json(TokenResponse { token }))
}
