use axum::{
    Router,
    http::HeaderName,
    middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Module for routing segregation (Public, Admin).
pub mod routes;
use routes::{admin, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use repository::{InMemoryOrderRepository, InMemoryPizzaRepository, InMemoryUserRepository};
pub use service::{OrderService, PizzaService, UserService};

/// ApiDoc
///
/// Auto-generated OpenAPI document for every handler and schema, served at
/// `/api-docs/openapi.json` and browsable under `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_menu, handlers::add_pizza_to_menu, handlers::delete_pizza_from_menu,
        handlers::create_order, handlers::check_order_status, handlers::cancel_order,
        handlers::cancel_order_regardless_status, handlers::get_order,
        handlers::advance_order_status, handlers::register_user, handlers::login
    ),
    components(
        schemas(
            models::Pizza, models::Order, models::OrderItem, models::OrderStatus,
            models::Role, models::UserView, models::CreateOrderRequest, models::Credentials,
            models::OrderStatusResponse, models::TokenResponse, models::ErrorResponse,
        )
    ),
    tags(
        (name = "pizza-backend", description = "Pizza ordering API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single shared container handed to every handler: the three services
/// (each already wired to its repository) and the immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub pizzas: PizzaService,
    pub orders: OrderService,
    pub users: UserService,
    pub config: AppConfig,
}

impl AppState {
    /// in_memory
    ///
    /// Wires the services over fresh in-memory repositories. The menu starts
    /// empty unless `config.seed_menu` is set.
    pub fn in_memory(config: AppConfig) -> Self {
        let pizza_repo = if config.seed_menu {
            InMemoryPizzaRepository::with_menu(service::pizza::demo_menu())
        } else {
            InMemoryPizzaRepository::new()
        };

        let pizzas = PizzaService::new(Arc::new(pizza_repo));
        let orders = OrderService::new(Arc::new(InMemoryOrderRepository::new()), pizzas.clone());
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        );

        Self {
            pizzas,
            orders,
            users,
            config,
        }
    }

    /// Creates the configured admin account, if any.
    pub async fn seed_admin(&self) -> Result<(), AppError> {
        match self.config.admin_credentials() {
            Some((username, password)) => self.users.seed_admin(username, password).await,
            None => {
                tracing::warn!("no admin credentials configured; admin routes are unreachable");
                Ok(())
            }
        }
    }
}

/// create_router
///
/// Assembles the routing table, applies the admin capability check to the
/// admin routes, and wraps everything in the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Admin routes share paths with some public ones (e.g. GET vs POST /pizza);
        // merging keeps the layer on the admin methods only.
        .merge(
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_admin,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line of one request shares the
/// same `req_id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
