//! Bearer-token identity. Tokens are issued by the external user service; this crate only verifies them.

pub mod permissions;

pub use permissions::{catalog, is_authorized, verify_permission, PermissionGroup};

use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// JWT claims expected from the user service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: i64,
}

fn default_true() -> bool {
    true
}

impl Claims {
    /// Claims for `user_id` valid for `lifetime_secs` from now.
    pub fn new(user_id: Uuid, fullname: &str, permissions: &[&str], lifetime_secs: i64) -> Self {
        Claims {
            sub: user_id.to_string(),
            fullname: fullname.to_string(),
            is_active: true,
            is_superuser: false,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            exp: (Utc::now() + Duration::seconds(lifetime_secs)).timestamp(),
        }
    }
}

/// The authenticated caller, derived from verified claims.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub fullname: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub permissions: HashSet<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("token subject is not a user id".into()))?;
        Ok(CurrentUser {
            id,
            fullname: claims.fullname,
            is_active: claims.is_active,
            is_superuser: claims.is_superuser,
            permissions: claims.permissions.into_iter().collect(),
        })
    }
}

/// HS256 verifier sharing the user service's secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        TokenVerifier {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }

    /// Sign claims. Used by tooling and tests; production tokens come from the user service.
    pub fn issue(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }
}

/// Token part of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
