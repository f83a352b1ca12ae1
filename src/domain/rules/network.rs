//! Network rule evaluators
//!
//! URL and IP address syntax checks.

use validator::{ValidateIp, ValidateUrl};

use crate::domain::rule::Rule;
use crate::domain::value::EnvValue;

/// Validates that a value is a well-formed URL.
///
/// Any scheme is accepted, not just http/https.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlRule;

impl UrlRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UrlRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        match value.as_str() {
            Some(s) => s.validate_url(),
            None => false,
        }
    }

    fn message(&self) -> String {
        "The :attribute must be a valid URL.".to_string()
    }

    fn kind(&self) -> &'static str {
        "url"
    }
}

/// IP version selector for [`IpRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpVersion {
    V4,
    V6,
    #[default]
    Any,
}

/// Validates that a value is a well-formed IP address for the selected
/// version.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpRule {
    version: IpVersion,
}

impl IpRule {
    /// Accept either IPv4 or IPv6
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept IPv4 only
    pub fn v4() -> Self {
        Self {
            version: IpVersion::V4,
        }
    }

    /// Accept IPv6 only
    pub fn v6() -> Self {
        Self {
            version: IpVersion::V6,
        }
    }

    /// The configured version selector
    pub fn version(&self) -> IpVersion {
        self.version
    }
}

impl Rule for IpRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        match self.version {
            IpVersion::V4 => s.validate_ipv4(),
            IpVersion::V6 => s.validate_ipv6(),
            IpVersion::Any => s.validate_ip(),
        }
    }

    fn message(&self) -> String {
        match self.version {
            IpVersion::V4 => "The :attribute must be a valid IPv4 address.".to_string(),
            IpVersion::V6 => "The :attribute must be a valid IPv6 address.".to_string(),
            IpVersion::Any => "The :attribute must be a valid IP address.".to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        "ip"
    }
}
