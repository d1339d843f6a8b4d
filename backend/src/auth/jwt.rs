use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Access-token claims issued by the external auth provider. Tokens are only
/// verified here, never minted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match &config.auth_jwt_audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.auth_jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AppError::Unauthorized
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config(audience: Option<&str>) -> Config {
        Config {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:5173".into(),
            auth_jwt_secret: "test-secret".into(),
            auth_jwt_audience: audience.map(String::from),
            ai_service_url: String::new(),
            ai_timeout_secs: 1,
            ai_model_version: "test".into(),
            rewind_window_days: 5,
            happiness_lookback_days: 30,
        }
    }

    fn sign(secret: &str, claims: &serde_json::Value) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn far_future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn accepts_a_token_signed_with_the_shared_secret() {
        let user = Uuid::new_v4();
        let token = sign("test-secret", &serde_json::json!({ "sub": user, "exp": far_future() }));
        let data = verify_token(&token, &config(None)).unwrap();
        assert_eq!(data.claims.sub, user);
        assert!(data.claims.email.is_none());
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let user = Uuid::new_v4();
        let forged = sign("other", &serde_json::json!({ "sub": user, "exp": far_future() }));
        assert!(matches!(verify_token(&forged, &config(None)), Err(AppError::Unauthorized)));

        let expired = sign("test-secret", &serde_json::json!({ "sub": user, "exp": 1_000 }));
        assert!(matches!(verify_token(&expired, &config(None)), Err(AppError::Unauthorized)));
    }

    #[test]
    fn checks_audience_only_when_configured() {
        let user = Uuid::new_v4();
        let token = sign(
            "test-secret",
            &serde_json::json!({ "sub": user, "exp": far_future(), "aud": "authenticated" }),
        );
        assert!(verify_token(&token, &config(Some("authenticated"))).is_ok());
        assert!(verify_token(&token, &config(Some("service_role"))).is_err());
        assert!(verify_token(&token, &config(None)).is_ok());
    }
}
