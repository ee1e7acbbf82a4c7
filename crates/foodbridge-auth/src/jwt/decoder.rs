//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use foodbridge_core::config::AuthConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;

use super::claims::Claims;

/// Validates HS256 bearer tokens against the shared secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a bearer token string.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use foodbridge_core::error::ErrorKind;
    use foodbridge_entity::user::UserRole;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn token(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, UserRole::Charity, Utc::now() + Duration::hours(1));
        let decoded = JwtDecoder::new(&config())
            .decode(&token("test-secret", &claims))
            .unwrap();
        assert_eq!(decoded.user_id(), user_id);
        assert_eq!(decoded.role, UserRole::Charity);
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::new(
            Uuid::new_v4(),
            UserRole::Donor,
            Utc::now() - Duration::hours(1),
        );
        let err = JwtDecoder::new(&config())
            .decode(&token("test-secret", &claims))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(Uuid::new_v4(), UserRole::Donor, Utc::now() + Duration::hours(1));
        let err = JwtDecoder::new(&config())
            .decode(&token("other-secret", &claims))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
