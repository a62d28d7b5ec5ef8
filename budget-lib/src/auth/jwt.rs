use crate::config::AuthConfig;
use crate::user::UserIdentity;
use anyhow::{anyhow, Context};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde::Serialize;
use std::fs;

/// Verifies bearer tokens issued by the identity provider.
///
/// Tokens can only be minted when built from a shared secret.
#[derive(Clone)]
pub struct JWTAuth {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    audience: Option<String>,
}

#[derive(Serialize)]
struct Claims {
    exp: usize,
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
}

/// The claims read from a validated token. `exp`, `iss` and `aud` are checked by [Validation],
/// which accepts `aud` as a string or an array.
#[derive(Deserialize)]
struct IdentityClaims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
}

impl JWTAuth {
    const EXPIRE_TIME: i64 = 30 * 24 * 60 * 60;

    pub fn from_secret(secret: &[u8]) -> JWTAuth {
        JWTAuth {
            encoding_key: Some(EncodingKey::from_secret(secret)),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            issuer: None,
            audience: None,
        }
    }

    pub fn from_rsa_pem(public_key: &[u8]) -> Result<JWTAuth, jsonwebtoken::errors::Error> {
        Ok(JWTAuth {
            encoding_key: None,
            decoding_key: DecodingKey::from_rsa_pem(public_key)?,
            validation: Validation::new(Algorithm::RS256),
            issuer: None,
            audience: None,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<JWTAuth, anyhow::Error> {
        let mut jwt_auth = match (&config.secret, &config.public_key_file) {
            (Some(secret), None) => JWTAuth::from_secret(secret.as_bytes()),
            (None, Some(public_key_file)) => {
                let public_key =
                    fs::read(public_key_file).context("Unable to read auth public key file")?;
                JWTAuth::from_rsa_pem(&public_key).context("Unable to parse auth public key")?
            }
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "Auth config must not set both secret and public_key_file"
                ))
            }
            (None, None) => {
                return Err(anyhow!(
                    "Auth config requires either secret or public_key_file"
                ))
            }
        };
        if let Some(issuer) = &config.issuer {
            jwt_auth = jwt_auth.with_issuer(issuer);
        }
        if let Some(audience) = &config.audience {
            jwt_auth = jwt_auth.with_audience(audience);
        }
        Ok(jwt_auth)
    }

    pub fn with_issuer(mut self, issuer: &str) -> JWTAuth {
        self.validation.set_issuer(&[issuer]);
        self.issuer = Some(issuer.to_owned());
        self
    }

    pub fn with_audience(mut self, audience: &str) -> JWTAuth {
        self.validation.set_audience(&[audience]);
        self.audience = Some(audience.to_owned());
        self
    }

    pub fn create_token(&self, identity: &UserIdentity) -> Result<String, anyhow::Error> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| anyhow!("Tokens can only be created with a shared secret"))?;
        let claims = Claims {
            exp: Self::generate_exp(),
            sub: identity.auth0id.clone(),
            name: Some(identity.name.clone()),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, encoding_key)
            .context("Unable to encode token")
    }

    /// Returns the caller's identity. Tokens without a `name` claim are named after their subject.
    pub fn validate_token(&self, token: &str) -> Result<UserIdentity, jsonwebtoken::errors::Error> {
        let claims =
            jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)?
                .claims;
        let name = claims.name.unwrap_or_else(|| claims.sub.clone());
        Ok(UserIdentity::new(claims.sub, name))
    }

    fn generate_exp() -> usize {
        (Utc::now() + Duration::seconds(Self::EXPIRE_TIME)).timestamp() as usize
    }
}
