/// Service Module Index
///
/// Domain logic sitting between the HTTP handlers and the repositories. Each
/// service is a cheap `Clone` handle over its repository trait objects, so the
/// same instance is shared by every request through `AppState`.

/// Menu management and existence checks.
pub mod pizza;

/// Order creation, pricing and the status lifecycle.
pub mod order;

/// Registration, credential checks and token issuance.
pub mod user;

pub use order::OrderService;
pub use pizza::PizzaService;
pub use user::UserService;
