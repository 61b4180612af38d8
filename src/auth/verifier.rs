use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::{map_jwt_error, AuthError, Claims};
use crate::config::AppConfig;

use super::jwks::JwksVerifier;

/// Signature verification backend for bearer tokens.
///
/// The route middleware only sees this trait, so swapping the remote JWKS
/// backend for the shared-secret one is a configuration decision.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 verification against a locally configured shared secret.
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::verifier_unavailable("JWT secret not configured"));
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

/// Pick the verifier backend from configuration: a JWKS URL selects remote
/// RS256 verification, otherwise the shared secret is used.
pub fn verifier_from_config(config: &AppConfig) -> Arc<dyn TokenVerifier> {
    match &config.auth.jwks_url {
        Some(url) => Arc::new(JwksVerifier::new(
            url.clone(),
            config.auth.audience.clone(),
            config.auth.issuer.clone(),
        )),
        None => Arc::new(SharedSecretVerifier::new(config.auth.jwt_secret.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(secret: &str, claims: &Claims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims(exp: i64) -> Claims {
        Claims {
            permissions: Some(vec!["get:drinks-detail".into()]),
            exp,
            iat: None,
            sub: Some("user-1".into()),
        }
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let verifier = SharedSecretVerifier::new("secret");
        let token = mint("secret", &claims(chrono::Utc::now().timestamp() + 3600));
        let verified = verifier.verify(&token).await.unwrap();
        assert_eq!(verified.sub.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn expired_token_maps_to_token_expired() {
        let verifier = SharedSecretVerifier::new("secret");
        let token = mint("secret", &claims(chrono::Utc::now().timestamp() - 3600));
        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err.code, "token_expired");
        assert_eq!(err.status_code, 401);
    }

    #[tokio::test]
    async fn garbage_token_is_unparseable() {
        let verifier = SharedSecretVerifier::new("secret");
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert_eq!(err.status_code, 400);
    }

    #[tokio::test]
    async fn wrong_signature_is_rejected() {
        let verifier = SharedSecretVerifier::new("secret");
        let token = mint("other-secret", &claims(chrono::Utc::now().timestamp() + 3600));
        assert!(verifier.verify(&token).await.is_err());
    }
}
