use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by storefront tokens.
///
/// Tokens issued by the service bind only a subject id and an issue time.
/// There is no expiration claim by default: a token stays valid until the
/// signing secret rotates. `exp` is still understood when present so the
/// verifier rejects bounded tokens that have lapsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id the token was issued for)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp), absent on service-issued tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims for an identity, with no expiration.
    ///
    /// # Arguments
    /// * `subject` - unique identity id (admin or user)
    pub fn for_subject(subject: impl ToString) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: Some(Utc::now().timestamp()),
            exp: None,
        }
    }

    /// Subject id, if the token carries one.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}
