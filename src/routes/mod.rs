/// Router Module Index
///
/// Splits the routing table by access level so the authorization layer is
/// applied once, at module level, instead of inside individual handlers.

/// Routes open to anonymous callers.
pub mod public;

/// Routes wrapped in the `require_admin` capability check.
pub mod admin;
