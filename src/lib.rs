//! BasicApi
//!
//! A small HTTP API with:
//! - User registration and login backed by an in-memory credential store
//! - Signed, time-bound bearer tokens (HS256 JWT)
//! - CRUD and search over an in-memory product catalog

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, ProductServiceTrait, UserServiceTrait};
use domain::product::ProductDraft;
use domain::user::NewUser;
use domain::DomainError;
use infrastructure::auth::{JwtConfig, JwtService, TokenAuthority};
use infrastructure::product::{InMemoryProductRepository, ProductService};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PasswordHasher, PasswordHasherKind, SaltedSha256Hasher,
    UserService,
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_authority = create_token_authority(config)?;

    let seed = config.seed.demo_data;
    let user_service = match config.auth.password_hasher {
        PasswordHasherKind::SaltedSha256 => create_user_service(SaltedSha256Hasher::new(), seed)?,
        PasswordHasherKind::Argon2 => create_user_service(Argon2Hasher::new(), seed)?,
    };
    info!(hasher = ?config.auth.password_hasher, "Credential store ready");

    let product_service = create_product_service(seed);

    if seed {
        info!("Demo users and products seeded");
    }

    Ok(AppState::new(user_service, product_service, token_authority))
}

fn create_token_authority(config: &AppConfig) -> anyhow::Result<Arc<dyn TokenAuthority>> {
    let secret = config.jwt.resolve_secret().ok_or_else(|| {
        DomainError::configuration(format!(
            "JWT secret key is not configured. Set jwt.secret_key or the {} environment variable",
            config::JWT_SECRET_ENV
        ))
    })?;

    let jwt_config = JwtConfig::new(secret)
        .with_issuer(config.jwt.issuer.clone())
        .with_audience(config.jwt.audience.clone())
        .with_expiration_minutes(config.jwt.expiration_minutes);

    info!(
        issuer = %jwt_config.issuer,
        audience = %jwt_config.audience,
        expiration_minutes = jwt_config.expiration_minutes,
        "Token authority configured"
    );

    Ok(Arc::new(JwtService::new(jwt_config)?))
}

fn create_user_service<H: PasswordHasher + 'static>(
    hasher: H,
    seed: bool,
) -> anyhow::Result<Arc<dyn UserServiceTrait>> {
    let users = if seed {
        demo_users(&hasher)?
    } else {
        Vec::new()
    };

    let repository = InMemoryUserRepository::with_users(users)?;
    Ok(Arc::new(UserService::new(
        Arc::new(repository),
        Arc::new(hasher),
    )))
}

/// Demo identities, ids 1 and 2
fn demo_users(hasher: &impl PasswordHasher) -> Result<Vec<NewUser>, DomainError> {
    Ok(vec![
        NewUser::new("admin", "admin@basicapi.com", hasher.hash("admin123")?).with_role("Admin"),
        NewUser::new("user", "user@basicapi.com", hasher.hash("user123")?),
    ])
}

fn create_product_service(seed: bool) -> Arc<dyn ProductServiceTrait> {
    let repository = if seed {
        InMemoryProductRepository::with_products(demo_products())
    } else {
        InMemoryProductRepository::new()
    };

    Arc::new(ProductService::new(Arc::new(repository)))
}

fn demo_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft::new("Laptop", 999.99)
            .with_description("Gaming laptop")
            .with_stock_quantity(10),
        ProductDraft::new("Mouse", 29.99)
            .with_description("Wireless mouse")
            .with_stock_quantity(50),
        ProductDraft::new("Keyboard", 79.99)
            .with_description("Mechanical keyboard")
            .with_stock_quantity(25),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::user::UserId;

    fn config_with_secret() -> AppConfig {
        let mut config = AppConfig::default();
        config.jwt.secret_key = Some("lib-test-secret".to_string());
        config
    }

    #[tokio::test]
    async fn test_seeded_state() {
        let state = create_app_state_with_config(&config_with_secret())
            .await
            .unwrap();

        assert_eq!(state.user_service.count().await.unwrap(), 2);
        assert_eq!(state.product_service.list().await.unwrap().len(), 3);

        let admin = state.user_service.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(admin.id(), UserId::new(1));
        assert_eq!(admin.role(), "Admin");

        let user = state.user_service.authenticate("user", "user123").await.unwrap();
        assert_eq!(user.id(), UserId::new(2));
        assert_eq!(user.role(), "User");
    }

    #[tokio::test]
    async fn test_unseeded_state() {
        let mut config = config_with_secret();
        config.seed.demo_data = false;

        let state = create_app_state_with_config(&config).await.unwrap();

        assert_eq!(state.user_service.count().await.unwrap(), 0);
        assert!(state.product_service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_argon2_seeded_state() {
        let mut config = config_with_secret();
        config.auth.password_hasher = PasswordHasherKind::Argon2;

        let state = create_app_state_with_config(&config).await.unwrap();
        let admin = state.user_service.authenticate("admin", "admin123").await.unwrap();
        assert!(admin.password_hash().starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_configured_token_lifetime() {
        let mut config = config_with_secret();
        config.jwt.expiration_minutes = 5;

        let state = create_app_state_with_config(&config).await.unwrap();
        assert_eq!(state.token_authority.expiration_minutes(), 5);
    }

    #[tokio::test]
    async fn test_out_of_range_token_lifetime_fails_startup() {
        let mut config = config_with_secret();
        config.jwt.expiration_minutes = u64::MAX;

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_alice_scenario() {
        let state = create_app_state_with_config(&config_with_secret())
            .await
            .unwrap();
        let users = &state.user_service;

        let alice = users
            .register(infrastructure::user::RegisterUserRequest::new(
                "alice",
                "alice@x.com",
                "secret123",
            ))
            .await
            .unwrap();
        assert_eq!(alice.id(), UserId::new(3));

        let wrong = users.authenticate("alice", "wrong").await;
        assert!(matches!(wrong, Err(DomainError::InvalidCredentials)));

        let alice = users.authenticate("alice", "secret123").await.unwrap();
        assert_eq!(alice.role(), "User");

        let issued = state.token_authority.mint(&alice).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = state.token_authority.validate(&issued.token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.subject_id(), Some(alice.id()));

        // Deactivation does not revoke the token
        users.deactivate(alice.id()).await.unwrap();
        assert!(state.token_authority.validate(&issued.token).is_ok());
        assert!(users.authenticate("alice", "secret123").await.is_err());
    }
}
