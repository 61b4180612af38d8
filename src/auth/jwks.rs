use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::auth::{map_jwt_error, AuthError, Claims};

use super::verifier::TokenVerifier;

/// One RSA public key from the provider's JWKS document.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub n: String,
    pub e: String,
    #[serde(default)]
    pub kty: String,
    #[serde(default, rename = "use")]
    pub usage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// RS256 verification against a remote JSON Web Key Set.
///
/// Keys are cached by key id; an unknown kid triggers one refetch before the
/// request fails, so provider key rotation does not need a restart.
pub struct JwksVerifier {
    jwks_url: String,
    audience: String,
    issuer: String,
    client: reqwest::Client,
    keys: RwLock<HashMap<String, Jwk>>,
}

impl JwksVerifier {
    pub fn new(jwks_url: String, audience: String, issuer: String) -> Self {
        Self {
            jwks_url,
            audience,
            issuer,
            client: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let set: JwkSet = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::verifier_unavailable(format!("JWKS fetch failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AuthError::verifier_unavailable(format!("JWKS parse failed: {}", e)))?;

        let mut keys = self.keys.write().await;
        keys.clear();
        for key in set.keys {
            keys.insert(key.kid.clone(), key);
        }
        info!("refreshed JWKS cache from {} ({} keys)", self.jwks_url, keys.len());
        Ok(())
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk, AuthError> {
        {
            let keys = self.keys.read().await;
            if let Some(key) = keys.get(kid) {
                return Ok(key.clone());
            }
        }

        // Cache miss: the provider may have rotated keys, refetch once
        self.refresh().await?;

        let keys = self.keys.read().await;
        keys.get(kid).cloned().ok_or_else(|| AuthError::unknown_key_id(kid))
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::unparseable_token())?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_header("token header does not contain a kid"))?;

        let jwk = self.key_for(&kid).await?;
        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|_| AuthError::unparseable_token())?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}
