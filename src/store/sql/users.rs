use crate::model::{NewUser, User};
use crate::store::{StoreError, UserRepository};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SqlUserRepository {
    pool: SqlitePool,
}

impl SqlUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        user.validate().map_err(StoreError::Validation)?;
        let encrypted_password = user
            .encrypted_password()
            .await
            .map_err(StoreError::PasswordHash)?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, encrypted_password, role) VALUES (?, ?, ?)
             RETURNING id, email, encrypted_password, role",
        )
        .bind(&user.email)
        .bind(&encrypted_password)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match StoreError::from_sqlx(e, "user") {
            StoreError::Constraint(_) => {
                StoreError::Constraint(format!("email {} is already registered", user.email))
            }
            other => other,
        })?;

        debug!(user_id = created.id, "Created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, encrypted_password, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "user"))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, encrypted_password, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "user"))
    }
}
