//! Session token issuing and verification.
//!
//! Tokens are self-contained HS256 JWTs carrying the caller's public profile.
//! There is no server-side session table, so a token cannot be revoked: logout
//! only drops the cookie and a leaked token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::errors::ClinicError;
use crate::core::models::UserProfile;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(flatten)]
    pub user: UserProfile,
    pub iat: usize, // Issued-at timestamp
    pub exp: usize, // Expiration timestamp
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Your session has expired. Please log in again.")]
    Expired,
    #[error("Invalid token. Please log in again.")]
    Malformed,
}

impl From<TokenError> for ClinicError {
    fn from(err: TokenError) -> Self {
        ClinicError::Unauthenticated(err.to_string())
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &UserProfile) -> Result<String, ClinicError> {
        let now = Utc::now();
        let claims = Claims {
            user: user.clone(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ClinicError::Internal(format!("JWT encoding error: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<UserProfile, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.user)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    fn profile() -> UserProfile {
        UserProfile {
            id: "doc-1".to_string(),
            name: "Dr. Rao".to_string(),
            email: "rao@clinic.test".to_string(),
            role: Role::Doctor,
            specialization: Some("Cardiology".to_string()),
            is_first_login: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn verify_returns_embedded_identity() {
        let service = JwtService::new("test-secret", Duration::days(14));
        let user = profile();
        let token = service.issue(&user).unwrap();
        assert_eq!(service.verify(&token).unwrap(), user);
    }

    #[test]
    fn token_payload_is_identity_and_times() {
        let service = JwtService::new("test-secret", Duration::days(14));
        let token = service.issue(&profile()).unwrap();
        let data = decode::<serde_json::Value>(&token, &service.decoding_key, &service.validation).unwrap();
        let claims = data.claims;
        assert_eq!(claims["role"], "DOCTOR");
        assert_eq!(claims["specialization"], "Cardiology");
        assert!(claims.get("password").is_none());
        assert!(claims.get("passwordHash").is_none());
        let lifetime = claims["exp"].as_u64().unwrap() - claims["iat"].as_u64().unwrap();
        assert_eq!(lifetime, 14 * 24 * 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = JwtService::new("test-secret", Duration::seconds(-120));
        let token = service.issue(&profile()).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_malformed() {
        let issuer = JwtService::new("one-secret", Duration::days(14));
        let verifier = JwtService::new("another-secret", Duration::days(14));
        let token = issuer.issue(&profile()).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn garbage_is_malformed() {
        let service = JwtService::new("test-secret", Duration::days(14));
        assert_eq!(service.verify("not.a.jwt"), Err(TokenError::Malformed));
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn token_errors_map_to_unauthenticated() {
        let err: ClinicError = TokenError::Expired.into();
        assert!(
            matches!(err, ClinicError::Unauthenticated(ref msg) if msg == "Your session has expired. Please log in again.")
        );
    }
}
