use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::AppError, models::Role};

/// Claims
///
/// The payload signed into every auth token. Validated on each admin request;
/// the role in the token is trusted for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the username of the caller.
    pub sub: String,
    /// The authorization tier granted at login.
    pub role: Role,
    /// Expiration Time (exp): seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat): seconds since the epoch.
    pub iat: usize,
}

/// issue_token
///
/// Signs an HS256 token for `username` carrying `role`, valid for `ttl_hours`.
pub fn issue_token(
    username: &str,
    role: Role,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!("token lifetime of {} hours is out of range", ttl_hours))
        })?;

    let claims = Claims {
        sub: username.to_string(),
        role,
        exp: expiration.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// authorize
///
/// The capability check behind every protected route: given the raw token and
/// the role the route requires, decide allow or deny.
///
/// * Missing, malformed, badly signed or expired token -> `Unauthorized`.
/// * Valid token whose role does not satisfy `required` -> `Forbidden`.
pub fn authorize(token: Option<&str>, secret: &str, required: Role) -> Result<Claims, AppError> {
    let token = token.ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    let mut validation = Validation::default();
    // Ensure expiration time validation is always active.
    validation.validate_exp = true;
    validation.leeway = 0;

    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "token expired",
                ErrorKind::InvalidSignature => "token signature mismatch",
                _ => "invalid token",
            };
            return Err(AppError::Unauthorized(reason.to_string()));
        }
    };

    if !claims.role.satisfies(required) {
        return Err(AppError::Forbidden(format!(
            "route requires role {:?}, caller has {:?}",
            required, claims.role
        )));
    }

    Ok(claims)
}

/// Pulls the token out of `Authorization: Bearer <token>`, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// require_admin
///
/// Route-layer middleware guarding the admin routes. It runs `authorize` with
/// `Role::Admin` and, on success, forwards the request with the decoded
/// [`Claims`] stored in its extensions so handlers can read them through
/// `Extension<Claims>` without decoding the token again.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authorize(
        bearer_token(request.headers()),
        &state.config.jwt_secret,
        Role::Admin,
    )
    .inspect_err(|e| {
        tracing::warn!(uri = %request.uri(), "admin route denied: {}", e);
    })?;

    tracing::debug!(user = %claims.sub, "admin route authorized");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
