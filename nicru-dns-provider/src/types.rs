use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ============ Credentials ============

/// Static description of one credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialField {
    /// Machine-readable key, as used in credential files.
    pub key: &'static str,
    /// Human-readable description shown in error messages.
    pub label: &'static str,
}

/// Every field a [`Credentials`] value needs, in declaration order.
pub const CREDENTIAL_FIELDS: [CredentialField; 7] = [
    CredentialField {
        key: "client_id",
        label: "The id of application",
    },
    CredentialField {
        key: "client_secret",
        label: "The token of application",
    },
    CredentialField {
        key: "username",
        label: "Username for nic.ru Remote API (---/NIC-D)",
    },
    CredentialField {
        key: "password",
        label: "Password for nic.ru Remote API",
    },
    CredentialField {
        key: "scope",
        label: "Scope for access (GET:/dns-master/.+)",
    },
    CredentialField {
        key: "service",
        label: "Service name",
    },
    CredentialField {
        key: "zone",
        label: "Zone name",
    },
];

/// Credential validation error.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl CredentialValidationError {
    /// Machine-readable key of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. } | Self::EmptyField { field, .. } => field,
        }
    }
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field, label } => {
                write!(f, "Property \"{field}\" not found (should be {label})")
            }
            Self::EmptyField { field, label } => {
                write!(f, "Property \"{field}\" must not be empty (should be {label})")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Account credentials for the nic.ru API.
///
/// `service` and `zone` are the default service and zone that every record
/// call is scoped to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth application id.
    pub client_id: String,
    /// OAuth application secret.
    pub client_secret: String,
    /// Account login, e.g. `123456/NIC-D`.
    pub username: String,
    /// Account password.
    pub password: String,
    /// OAuth scope, e.g. `GET:/dns-master/.+`.
    pub scope: String,
    /// DNS hosting service name.
    pub service: String,
    /// Zone managed through this account, e.g. `example.com`.
    pub zone: String,
}

impl Credentials {
    /// Construct credentials from a flat key-value map, validating required fields.
    ///
    /// Values are trimmed. The first missing or empty field is reported.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let [
            client_id,
            client_secret,
            username,
            password,
            scope,
            service,
            zone,
        ] = CREDENTIAL_FIELDS;

        Ok(Self {
            client_id: Self::get_required_field(map, client_id)?,
            client_secret: Self::get_required_field(map, client_secret)?,
            username: Self::get_required_field(map, username)?,
            password: Self::get_required_field(map, password)?,
            scope: Self::get_required_field(map, scope)?,
            service: Self::get_required_field(map, service)?,
            zone: Self::get_required_field(map, zone)?,
        })
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &HashMap<String, String>,
        field: CredentialField,
    ) -> Result<String, CredentialValidationError> {
        match map.get(field.key) {
            None => Err(CredentialValidationError::MissingField {
                field: field.key.to_string(),
                label: field.label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: field.key.to_string(),
                label: field.label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }
}

// Secrets stay out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("username", &self.username)
            .field("password", &"***")
            .field("scope", &self.scope)
            .field("service", &self.service)
            .field("zone", &self.zone)
            .finish()
    }
}

// ============ Records ============

/// TXT record to be staged in the zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecordRequest {
    /// Record name relative to the zone (e.g. `_acme-challenge`).
    pub name: String,
    /// TXT payload.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

/// A resource record as reported by the zone listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Provider-assigned record id.
    pub id: String,
    /// Record name relative to the zone.
    pub name: String,
    /// Record type (`TXT`, `A`, ...), if reported.
    pub record_type: Option<String>,
    /// TTL in seconds, if reported.
    pub ttl: Option<u32>,
    /// TXT strings (empty for other record types).
    pub txt: Vec<String>,
}

// ============ OAuth token ============

/// Bearer token obtained from the OAuth endpoint.
#[derive(Clone)]
pub struct AccessToken {
    pub(crate) value: String,
    /// Token type reported by the server (normally `Bearer`).
    pub token_type: String,
    /// Absolute expiry, if the server reported `expires_in`.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub(crate) fn new(value: String, token_type: String, expires_in: Option<i64>) -> Self {
        Self {
            value,
            token_type,
            expires_at: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    /// Whether the token is past its reported lifetime.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"***")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, String> {
        [
            ("client_id", "app-id"),
            ("client_secret", "app-secret"),
            ("username", "123456/NIC-D"),
            ("password", "hunter2"),
            ("scope", "GET:/dns-master/.+"),
            ("service", "EXAMPLE-SVC"),
            ("zone", " example.com "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn from_map_trims_values() {
        let creds = Credentials::from_map(&full_map()).unwrap();
        assert_eq!(creds.zone, "example.com");
        assert_eq!(creds.username, "123456/NIC-D");
    }

    #[test]
    fn from_map_reports_missing_field() {
        let mut map = full_map();
        map.remove("scope");
        let err = Credentials::from_map(&map).unwrap_err();
        assert_eq!(err.field(), "scope");
        assert!(matches!(err, CredentialValidationError::MissingField { .. }));
    }

    #[test]
    fn from_map_reports_empty_field() {
        let mut map = full_map();
        map.insert("password".to_string(), "   ".to_string());
        let err = Credentials::from_map(&map).unwrap_err();
        assert!(matches!(err, CredentialValidationError::EmptyField { .. }));
        assert_eq!(
            err.to_string(),
            "Property \"password\" must not be empty (should be Password for nic.ru Remote API)"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::from_map(&full_map()).unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("app-secret"));
        assert!(rendered.contains("app-id"));
    }

    #[test]
    fn token_expiry() {
        let fresh = AccessToken::new("t".into(), "Bearer".into(), Some(3600));
        assert!(!fresh.is_expired());

        let stale = AccessToken::new("t".into(), "Bearer".into(), Some(-1));
        assert!(stale.is_expired());

        let open_ended = AccessToken::new("t".into(), "Bearer".into(), None);
        assert!(!open_ended.is_expired());
        assert!(!format!("{open_ended:?}").contains("\"t\""));
    }
}
