use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::config::Config;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::middleware::Claims;
use crate::models::UserAccount;

pub struct AuthService {
    db: Database,
    config: Config,
}

impl AuthService {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<UserAccount> {
        let existing: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db.pg)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = self.hash_password(password)?;

        let user: UserAccount = sqlx::query_as(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2)
             RETURNING id, email, password_hash, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db.pg)
        .await?;

        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(UserAccount, String, String)> {
        let user: UserAccount = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db.pg)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.verify_password(password, &user.password_hash)?;

        let access_token = self.generate_access_token(&user)?;
        let refresh_token = self.generate_refresh_token(&user)?;

        Ok((user, access_token, refresh_token))
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string())
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn generate_access_token(&self, user: &UserAccount) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.config.jwt.expiry_hours as i64);

        self.sign_token(user, now.timestamp() as usize, exp.timestamp() as usize)
    }

    pub fn generate_refresh_token(&self, user: &UserAccount) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::days(30);

        self.sign_token(user, now.timestamp() as usize, exp.timestamp() as usize)
    }

    fn sign_token(&self, user: &UserAccount, iat: usize, exp: usize) -> Result<String> {
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, JwtConfig, ServerConfig};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    fn test_service() -> AuthService {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/unused".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_hours: 1,
            },
        };

        let opts = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(9)
            .username("nobody")
            .database("none");
        let pool = PgPoolOptions::new().connect_lazy_with(opts);

        AuthService::new(Database { pg: pool }, config)
    }

    fn test_user() -> UserAccount {
        UserAccount {
            id: uuid::Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let svc = test_service();
        let hash = svc.hash_password("s3cret-pw").unwrap();
        assert!(svc.verify_password("s3cret-pw", &hash).is_ok());
        assert!(matches!(
            svc.verify_password("wrong-pw", &hash),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn access_token_round_trips_claims() {
        let svc = test_service();
        let user = test_user();
        let token = svc.generate_access_token(&user).unwrap();

        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = test_service();
        let user = test_user();
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let token = svc.sign_token(&user, past, past + 60).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
