use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 100;

/// Authorization level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered account.
///
/// The password hash is never serialized, so a `User` can be written to a response as-is.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub encrypted_password: String,
    pub role: Role,
}

impl User {
    /// Checks a plain-text password against the stored argon2 hash.
    pub fn verify_password(&self, password: &str) -> bool {
        verify(&self.encrypted_password, password)
    }

    /// [`verify_password`](Self::verify_password) on the blocking pool, for use from handlers.
    pub async fn password_matches(&self, password: &str) -> bool {
        let hash = self.encrypted_password.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || verify(&hash, &password))
            .await
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// A self-registered account, which always gets [`Role::User`].
    pub fn registration(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::User,
        }
    }

    pub fn admin(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::Admin,
        }
    }

    /// Validates the email shape and password length.
    pub fn validate(&self) -> Result<(), String> {
        let mut parts = self.email.split('@');
        let valid_email = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !valid_email {
            return Err(format!("email: invalid address {:?}", self.email));
        }

        let len = self.password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Err(format!(
                "password: length must be between {} and {}",
                PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
            ));
        }

        Ok(())
    }

    /// Hashes the password with a fresh salt.
    pub fn hash_password(&self) -> Result<String, String> {
        hash(&self.password)
    }

    /// [`hash_password`](Self::hash_password) on the blocking pool.
    pub async fn encrypted_password(&self) -> Result<String, String> {
        let password = self.password.clone();
        tokio::task::spawn_blocking(move || hash(&password))
            .await
            .map_err(|e| e.to_string())?
    }
}

fn hash(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| e.to_string())
}

fn verify(encrypted_password: &str, password: &str) -> bool {
    match PasswordHash::new(encrypted_password) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}
