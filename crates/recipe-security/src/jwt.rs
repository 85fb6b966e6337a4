//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use recipe_shared::constants::TOKEN_TYPE_ACCESS;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected token type: {0}")]
    WrongTokenType(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
        }
    }

    pub fn generate_access_token(&self, user_id: &Uuid, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })?;

        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::WrongTokenType(claims.token_type));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_and_validates_access_token() {
        let service = JwtService::new("test-secret", 3600);
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(&user_id, "admin").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtService::new("secret-a", 3600)
            .generate_access_token(&Uuid::new_v4(), "user")
            .unwrap();

        let result = JwtService::new("secret-b", 3600).validate_token(&token);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn reports_expired_tokens() {
        // Well past the default 60s leeway.
        let service = JwtService::new("test-secret", -3600);
        let token = service.generate_access_token(&Uuid::new_v4(), "user").unwrap();

        assert!(matches!(service.validate_token(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn rejects_garbage() {
        let service = JwtService::new("test-secret", 3600);
        assert!(service.validate_token("not.a.jwt").is_err());
    }
}
