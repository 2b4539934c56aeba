use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Purpose a token was issued for.
///
/// Access and refresh tokens are signed with the same secret, so the purpose
/// travels inside the claims and is checked on every validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

impl TokenUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenUse::Access => "access",
            TokenUse::Refresh => "refresh",
        }
    }
}

/// Identity claims carried by access and refresh tokens.
///
/// Registered claims follow RFC 7519. All fields are optional on the wire so
/// that a token missing one of them still decodes and can be rejected with a
/// precise error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Access or refresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_use: Option<TokenUse>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `token_use` - Whether the token is an access or refresh token
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, exp, iat and token_use set
    pub fn for_subject(subject: impl ToString, token_use: TokenUse, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            token_use: Some(token_use),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set token use.
    pub fn with_token_use(mut self, token_use: TokenUse) -> Self {
        self.token_use = Some(token_use);
        self
    }

    /// Subject if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("user123");
        assert_eq!(claims.sub, Some("user123".to_string()));
        assert!(claims.exp.is_none());
        assert!(claims.token_use.is_none());
    }

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", TokenUse::Access, Duration::minutes(15));

        assert_eq!(claims.subject(), Some("user123"));
        assert_eq!(claims.token_use, Some(TokenUse::Access));

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 15 * 60);
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::new().with_subject("");
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_token_use_serializes_lowercase() {
        let claims = Claims::new().with_token_use(TokenUse::Refresh);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["token_use"], "refresh");
        assert!(json.get("sub").is_none());
    }
}
