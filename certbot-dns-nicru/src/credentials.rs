//! Credential loading for the nic.ru authenticator
//!
//! Supports loading credentials from:
//! - certbot-style INI files (`dns_nicru_client_id = ...` or bare `client_id = ...`)
//! - Environment variables (`NICRU_CLIENT_ID`, ...)

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use nicru_dns_provider::{CREDENTIAL_FIELDS, Credentials};

use crate::error::{PluginError, PluginResult};

/// Key prefixes accepted in credential files (certbot plugin option naming).
const KEY_PREFIXES: [&str; 2] = ["dns_nicru_", "dns-nicru-"];

/// Prefix of the credential environment variables.
pub const ENV_PREFIX: &str = "NICRU_";

/// Credential loader for the nic.ru authenticator
#[derive(Debug, Default)]
pub struct CredentialLoader;

impl CredentialLoader {
    /// Load credentials from `path` when given, otherwise from the environment.
    pub fn load(path: Option<&Path>) -> PluginResult<Credentials> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_from_env(),
        }
    }

    /// Load credentials from an INI file
    ///
    /// # Security
    ///
    /// Warns on Unix when the file is accessible by group or others
    pub fn load_from_file(path: &Path) -> PluginResult<Credentials> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = fs::metadata(path).map_err(|e| {
                PluginError::Config(format!(
                    "Failed to read credentials file '{}': {e}",
                    path.display()
                ))
            })?;

            let file_mode = metadata.permissions().mode() & 0o777;
            if file_mode & 0o077 != 0 {
                log::warn!(
                    "Unsafe permissions on credentials configuration file '{}' (mode {file_mode:o}); \
                     it should only be accessible by its owner",
                    path.display()
                );
            }
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PluginError::Config(format!(
                "Failed to read credentials file '{}': {e}",
                path.display()
            ))
        })?;

        let values = parse_ini(&content).map_err(|e| {
            PluginError::Config(format!("Error parsing credentials file '{}': {e}", path.display()))
        })?;

        let missing = missing_fields(&values);
        if !missing.is_empty() {
            let lines: Vec<String> = missing
                .iter()
                .map(|(key, label)| format!(" * {}{key}: {label}", KEY_PREFIXES[0]))
                .collect();
            return Err(PluginError::Config(format!(
                "Missing properties in credentials configuration file '{}':\n{}",
                path.display(),
                lines.join("\n")
            )));
        }

        log::debug!("Loaded credentials from {}", path.display());
        Ok(Credentials::from_map(&values)?)
    }

    /// Load credentials from `NICRU_*` environment variables
    pub fn load_from_env() -> PluginResult<Credentials> {
        Self::load_from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary `NICRU_*` variable lookup.
    pub fn load_from_lookup<F>(lookup: F) -> PluginResult<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: HashMap<String, String> = CREDENTIAL_FIELDS
            .iter()
            .filter_map(|field| {
                lookup(&env_var_name(field.key)).map(|value| (field.key.to_string(), value))
            })
            .collect();

        let missing = missing_fields(&values);
        if !missing.is_empty() {
            let names: Vec<String> = missing
                .iter()
                .map(|(key, label)| format!("{} ({label})", env_var_name(key)))
                .collect();
            return Err(PluginError::Config(format!(
                "Missing environment variables: {}",
                names.join(", ")
            )));
        }

        log::debug!("Loaded credentials from environment");
        Ok(Credentials::from_map(&values)?)
    }
}

/// `client_id` -> `NICRU_CLIENT_ID`
pub fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_ascii_uppercase())
}

/// Fields that are absent or blank, as `(key, label)` pairs.
fn missing_fields(values: &HashMap<String, String>) -> Vec<(&'static str, &'static str)> {
    CREDENTIAL_FIELDS
        .iter()
        .filter(|field| values.get(field.key).is_none_or(|v| v.trim().is_empty()))
        .map(|field| (field.key, field.label))
        .collect()
}

/// Parse the INI subset certbot credential files use.
///
/// `[section]` headers are ignored; `#`/`;` start a comment line. An unquoted
/// value ends at the first whitespace followed by `#`; a value wrapped in
/// matching single or double quotes is taken verbatim, so a `#` inside a
/// secret needs quotes. Prefixed keys (`dns_nicru_zone`) take precedence over
/// bare ones (`zone`).
pub fn parse_ini(content: &str) -> Result<HashMap<String, String>, String> {
    let mut bare = HashMap::new();
    let mut prefixed = HashMap::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(format!("line {}: expected 'key = value'", idx + 1));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("line {}: empty key", idx + 1));
        }
        let value = parse_value(value.trim()).to_string();

        match KEY_PREFIXES.iter().find_map(|p| key.strip_prefix(p)) {
            Some(stripped) => prefixed.insert(stripped.to_string(), value),
            None => bare.insert(key.to_string(), value),
        };
    }

    bare.extend(prefixed);
    Ok(bare)
}

fn parse_value(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote)
            && let Some(end) = rest.find(quote)
        {
            return &rest[..end];
        }
    }
    strip_inline_comment(value)
}

/// Cut an unquoted value at ` #` (any whitespace before the `#`).
fn strip_inline_comment(value: &str) -> &str {
    let mut prev_ws = false;
    for (idx, ch) in value.char_indices() {
        if ch == '#' && prev_ws {
            return value[..idx].trim_end();
        }
        prev_ws = ch.is_whitespace();
    }
    value
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::FailureKind;

    const FULL_INI: &str = "\
# nic.ru API credentials
dns_nicru_client_id = app-id
dns_nicru_client_secret = app-secret
dns_nicru_username = 123456/NIC-D
dns_nicru_password = \"p#ss word\"
dns_nicru_scope = GET:/dns-master/.+
dns_nicru_service = EXAMPLE-SVC
dns_nicru_zone = example.com
";

    fn write_ini(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_prefixed_file() {
        let file = write_ini(FULL_INI);
        let creds = CredentialLoader::load_from_file(file.path()).unwrap();
        assert_eq!(creds.client_id, "app-id");
        assert_eq!(creds.username, "123456/NIC-D");
        assert_eq!(creds.password, "p#ss word");
        assert_eq!(creds.scope, "GET:/dns-master/.+");
        assert_eq!(creds.zone, "example.com");
    }

    #[test]
    fn test_bare_keys_sections_and_comments() {
        let file = write_ini(
            "[nicru]\n\
             ; semicolon comment\n\
             client_id=app-id\n\
             client_secret = 'app-secret'\n\
             username = 123456/NIC-D\n\
             password = hunter2\n\
             scope = GET:/dns-master/.+\n\
             service = EXAMPLE-SVC\n\
             zone = example.com\n",
        );
        let creds = CredentialLoader::load_from_file(file.path()).unwrap();
        assert_eq!(creds.client_secret, "app-secret");
        assert_eq!(creds.service, "EXAMPLE-SVC");
    }

    #[test]
    fn test_inline_comment_after_unquoted_value() {
        let values = parse_ini(
            "dns_nicru_zone = example.com  # production zone\n\
             dns_nicru_password = \"p#ss # word\"  # quoted keeps '#'\n\
             dns_nicru_client_secret = abc#def\n",
        )
        .unwrap();
        assert_eq!(values.get("zone").map(String::as_str), Some("example.com"));
        assert_eq!(values.get("password").map(String::as_str), Some("p#ss # word"));
        assert_eq!(values.get("client_secret").map(String::as_str), Some("abc#def"));

        let zone = values.get("zone").map(String::as_str).unwrap_or_default();
        assert_eq!(
            crate::derive_record_name("_acme-challenge.example.com", zone),
            "_acme-challenge"
        );
    }

    #[test]
    fn test_prefixed_key_wins() {
        let values = parse_ini("dns_nicru_zone = a.ru\nzone = b.ru\ndns-nicru-service = S\n").unwrap();
        assert_eq!(values.get("zone").map(String::as_str), Some("a.ru"));
        assert_eq!(values.get("service").map(String::as_str), Some("S"));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let file = write_ini("dns_nicru_client_id = app-id\ndns_nicru_zone = \n");
        let err = CredentialLoader::load_from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ConfigError);

        let msg = err.to_string();
        assert!(msg.contains("dns_nicru_client_secret: The token of application"));
        assert!(msg.contains("dns_nicru_zone: Zone name"));
        assert!(!msg.contains("dns_nicru_client_id"));
    }

    #[test]
    fn test_invalid_line() {
        let file = write_ini("dns_nicru_client_id app-id\n");
        let err = CredentialLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 1"), "unexpected error: {err}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialLoader::load_from_file(&dir.path().join("nicru.ini")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ConfigError);
        assert!(err.to_string().contains("Failed to read credentials file"));
    }

    #[test]
    fn test_load_from_lookup() {
        let env: HashMap<String, String> = CREDENTIAL_FIELDS
            .iter()
            .map(|f| (env_var_name(f.key), format!("{}-value", f.key)))
            .collect();

        let creds = CredentialLoader::load_from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(creds.client_id, "client_id-value");
        assert_eq!(creds.zone, "zone-value");
    }

    #[test]
    fn test_load_from_lookup_missing() {
        let err = CredentialLoader::load_from_lookup(|name| {
            (name != "NICRU_PASSWORD").then(|| "x".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variables: NICRU_PASSWORD (Password for nic.ru Remote API)"
        );
    }
}
