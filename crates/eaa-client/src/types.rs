//! Wire enumerations and shared response envelopes.
//!
//! Configuration uses the string forms; the API speaks numeric codes.
//! Conversions are total from enum to code and fallible the other way.

use serde::{Deserialize, Serialize};

use crate::error::{EaaError, EaaResult};

/// List-response paging envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub limit: i64,
    pub next: Option<String>,
    pub offset: i64,
    pub previous: Option<String>,
    pub total_count: i64,
}

/// Application access profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppProfile {
    Http,
    Sharepoint,
    Jira,
    Rdp,
    Vnc,
    Ssh,
    Jenkins,
    Confluence,
    Tcp,
}

impl AppProfile {
    /// Numeric wire code.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Http => 1,
            Self::Sharepoint => 2,
            Self::Jira => 3,
            Self::Rdp => 4,
            Self::Vnc => 5,
            Self::Ssh => 6,
            Self::Jenkins => 7,
            Self::Confluence => 8,
            Self::Tcp => 9,
        }
    }

    /// Decode a numeric wire code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Http),
            2 => Some(Self::Sharepoint),
            3 => Some(Self::Jira),
            4 => Some(Self::Rdp),
            5 => Some(Self::Vnc),
            6 => Some(Self::Ssh),
            7 => Some(Self::Jenkins),
            8 => Some(Self::Confluence),
            9 => Some(Self::Tcp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Sharepoint => "sharepoint",
            Self::Jira => "jira",
            Self::Rdp => "rdp",
            Self::Vnc => "vnc",
            Self::Ssh => "ssh",
            Self::Jenkins => "jenkins",
            Self::Confluence => "confluence",
            Self::Tcp => "tcp",
        }
    }

    pub fn parse(value: &str) -> EaaResult<Self> {
        match value {
            "http" => Ok(Self::Http),
            "sharepoint" => Ok(Self::Sharepoint),
            "jira" => Ok(Self::Jira),
            "rdp" => Ok(Self::Rdp),
            "vnc" => Ok(Self::Vnc),
            "ssh" => Ok(Self::Ssh),
            "jenkins" => Ok(Self::Jenkins),
            "confluence" => Ok(Self::Confluence),
            "tcp" => Ok(Self::Tcp),
            other => Err(EaaError::InvalidValue {
                field: "app_profile",
                value: other.to_string(),
            }),
        }
    }
}

/// Application type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Enterprise,
    Saas,
    Bookmark,
    Tunnel,
}

impl AppType {
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Enterprise => 1,
            Self::Saas => 2,
            Self::Bookmark => 3,
            Self::Tunnel => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Enterprise),
            2 => Some(Self::Saas),
            3 => Some(Self::Bookmark),
            4 => Some(Self::Tunnel),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::Saas => "saas",
            Self::Bookmark => "bookmark",
            Self::Tunnel => "tunnel",
        }
    }

    pub fn parse(value: &str) -> EaaResult<Self> {
        match value {
            "enterprise" => Ok(Self::Enterprise),
            "saas" => Ok(Self::Saas),
            "bookmark" => Ok(Self::Bookmark),
            "tunnel" => Ok(Self::Tunnel),
            other => Err(EaaError::InvalidValue {
                field: "app_type",
                value: other.to_string(),
            }),
        }
    }
}

/// Client application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientAppMode {
    Tcp,
    Tunnel,
}

impl ClientAppMode {
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Tcp => 1,
            Self::Tunnel => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Tcp),
            2 => Some(Self::Tunnel),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Tunnel => "tunnel",
        }
    }

    pub fn parse(value: &str) -> EaaResult<Self> {
        match value {
            "tcp" => Ok(Self::Tcp),
            "tunnel" => Ok(Self::Tunnel),
            other => Err(EaaError::InvalidValue {
                field: "client_app_mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Application domain kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppDomain {
    Custom,
    Wapp,
}

impl AppDomain {
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Custom => 1,
            Self::Wapp => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Custom),
            2 => Some(Self::Wapp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Wapp => "wapp",
        }
    }

    pub fn parse(value: &str) -> EaaResult<Self> {
        match value {
            "custom" => Ok(Self::Custom),
            "wapp" => Ok(Self::Wapp),
            other => Err(EaaError::InvalidValue {
                field: "domain",
                value: other.to_string(),
            }),
        }
    }
}

/// Application service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Waf,
    Acceleration,
    Av,
    Ips,
    Slb,
    Access,
    Rewrite,
}

impl ServiceType {
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Waf => 1,
            Self::Acceleration => 2,
            Self::Av => 3,
            Self::Ips => 4,
            Self::Slb => 5,
            Self::Access => 6,
            Self::Rewrite => 7,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Waf),
            2 => Some(Self::Acceleration),
            3 => Some(Self::Av),
            4 => Some(Self::Ips),
            5 => Some(Self::Slb),
            6 => Some(Self::Access),
            7 => Some(Self::Rewrite),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waf => "waf",
            Self::Acceleration => "acceleration",
            Self::Av => "av",
            Self::Ips => "ips",
            Self::Slb => "slb",
            Self::Access => "access",
            Self::Rewrite => "rewrite",
        }
    }
}

/// Certificate type codes.
pub mod cert_type {
    pub const APP: i64 = 1;
    pub const AGENT: i64 = 2;
    pub const INTERNAL: i64 = 3;
    pub const USER: i64 = 4;
    pub const APP_SELF_SIGNED: i64 = 5;
    pub const CA: i64 = 6;
}

/// Access-control rule constants.
pub mod rule {
    pub const TYPE_ACCESS_CONTROL: i64 = 1;
    pub const ACTION_DENY: i64 = 1;

    pub const ADMIN_STATE_ENABLED: i64 = 1;
    pub const ADMIN_STATE_DISABLED: i64 = 0;

    pub const OPERATOR_IS: &str = "==";
    pub const OPERATOR_IS_NOT: &str = "!=";

    pub const STATUS_ON: &str = "on";
    pub const STATUS_OFF: &str = "off";

    /// Setting types accepted in access-control rules.
    pub const SETTING_TYPES: &[&str] = &[
        "url", "group", "user", "clientip", "country", "time", "method",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_profile_codes_round_trip() {
        for profile in [
            AppProfile::Http,
            AppProfile::Sharepoint,
            AppProfile::Jira,
            AppProfile::Rdp,
            AppProfile::Vnc,
            AppProfile::Ssh,
            AppProfile::Jenkins,
            AppProfile::Confluence,
            AppProfile::Tcp,
        ] {
            assert_eq!(AppProfile::from_code(profile.code()), Some(profile));
            assert_eq!(AppProfile::parse(profile.as_str()).unwrap(), profile);
        }
        assert!(AppProfile::from_code(0).is_none());
        assert!(AppProfile::from_code(10).is_none());
    }

    #[test]
    fn app_type_codes_round_trip() {
        for app_type in [
            AppType::Enterprise,
            AppType::Saas,
            AppType::Bookmark,
            AppType::Tunnel,
        ] {
            assert_eq!(AppType::from_code(app_type.code()), Some(app_type));
            assert_eq!(AppType::parse(app_type.as_str()).unwrap(), app_type);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        let err = AppType::parse("desktop").unwrap_err();
        assert!(err.to_string().contains("app_type"));
        assert!(ClientAppMode::parse("vpn").is_err());
        assert!(AppDomain::parse("internal").is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&AppProfile::Sharepoint).unwrap(),
            "\"sharepoint\""
        );
        let parsed: AppType = serde_json::from_str("\"tunnel\"").unwrap();
        assert_eq!(parsed, AppType::Tunnel);
    }

    #[test]
    fn service_type_access_code() {
        assert_eq!(ServiceType::Access.code(), 6);
        assert_eq!(ServiceType::from_code(6), Some(ServiceType::Access));
        assert_eq!(ServiceType::Access.as_str(), "access");
    }
}
