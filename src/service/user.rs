use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{
    auth,
    error::AppError,
    models::{Role, User},
    repository::UserRepositoryState,
};

/// UserService
///
/// Accounts and login. Passwords are stored as argon2 hashes only; login hands
/// back a signed token carrying the username and role.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepositoryState,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl UserService {
    pub fn new(repo: UserRepositoryState, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            repo,
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// register_user
    ///
    /// Creates a `USER` account. Fails with `DuplicateKey` if the username is taken.
    pub async fn register_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.create_account(username, password, Role::User).await
    }

    /// seed_admin
    ///
    /// Creates the configured administrator at startup. Calling it again for an
    /// existing username is a no-op, so restarts with the same config are safe.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        match self.create_account(username, password, Role::Admin).await {
            Ok(_) => {
                tracing::info!(username = %username, "admin account seeded");
                Ok(())
            }
            Err(AppError::DuplicateKey(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// login
    ///
    /// Unknown usernames and wrong passwords produce the same `Unauthorized`
    /// error so callers cannot tell which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let invalid = || AppError::Unauthorized("invalid username or password".to_string());

        let user = self.repo.get(username.trim()).await.ok_or_else(invalid)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("stored hash unreadable: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid())?;

        let token = auth::issue_token(
            &user.username,
            user.role,
            &self.jwt_secret,
            self.token_ttl_hours,
        )?;
        tracing::info!(username = %user.username, role = ?user.role, "login succeeded");
        Ok(token)
    }

    async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_string()));
        }

        let user = User {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            role,
        };

        let user = self.repo.insert(user).await?;
        tracing::info!(username = %user.username, role = ?user.role, "user registered");
        Ok(user)
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("hashing failed: {}", e)))
}
