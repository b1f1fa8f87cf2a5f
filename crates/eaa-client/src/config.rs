//! API credentials loading.
//!
//! Credentials live in an INI-style `edgerc` file with one section per
//! account, e.g.:
//!
//! ```text
//! [default]
//! client_secret = xxxx
//! host = manage.example-api.net
//! access_token = akab-access
//! client_token = akab-client
//! max_body = 131072
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{EaaError, EaaResult};

/// Default cap on the number of body bytes covered by the content hash.
pub const DEFAULT_MAX_BODY: usize = 131_072;

/// Default credentials section name.
pub const DEFAULT_SECTION: &str = "default";

/// API credentials for one account section of an edgerc file.
///
/// The [`Debug`] impl redacts the secret and tokens to prevent accidental
/// credential exposure in log output.
#[derive(Clone)]
pub struct Credentials {
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
    /// API host, without scheme or trailing slash.
    pub host: String,
    /// Maximum number of request-body bytes covered by the content hash.
    pub max_body: usize,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_token", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("host", &self.host)
            .field("max_body", &self.max_body)
            .finish()
    }
}

/// Parsed edgerc credentials file.
#[derive(Debug, Clone, Default)]
pub struct Edgerc {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Edgerc {
    /// Load and parse an edgerc file from disk.
    pub fn load(path: impl AsRef<Path>) -> EaaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EaaError::InvalidConfig(format!("reading edgerc file {}: {e}", path.display()))
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse edgerc file contents.
    ///
    /// Lines outside any `[section]` header and lines without `=` are
    /// ignored, as are `#`/`;` comments.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            let Some(section) = current.as_ref() else {
                continue;
            };
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();
                sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key, value);
            }
        }

        Self { sections }
    }

    /// Build validated [`Credentials`] from the named section.
    pub fn credentials(&self, section: &str) -> EaaResult<Credentials> {
        let entries = self.sections.get(section).ok_or_else(|| {
            EaaError::InvalidConfig(format!("edgerc section '{section}' not found"))
        })?;

        let required = |key: &str| -> EaaResult<String> {
            entries
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| {
                    EaaError::InvalidConfig(format!(
                        "edgerc section '{section}' is missing '{key}'"
                    ))
                })
        };

        let host = normalize_host(&required("host")?);
        if host.is_empty() {
            return Err(EaaError::InvalidConfig(format!(
                "edgerc section '{section}' has an empty host"
            )));
        }

        let max_body = match entries.get("max_body") {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                EaaError::InvalidConfig(format!("invalid max_body value '{raw}'"))
            })?,
            None => DEFAULT_MAX_BODY,
        };

        Ok(Credentials {
            client_token: required("client_token")?,
            client_secret: required("client_secret")?,
            access_token: required("access_token")?,
            host,
            max_body,
        })
    }
}

fn normalize_host(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}
