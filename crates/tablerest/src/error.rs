//! Error types for tablerest

use crate::acl::Permission;
use thiserror::Error;

/// Result type alias for tablerest operations
pub type RestResult<T> = Result<T, RestError>;

/// Error types surfaced by the core.
///
/// Malformed pagination values are never errors; they are defaulted by
/// [`LimitParam::parse`](crate::LimitParam::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    /// The request cannot be turned into a statement (bad finder name, wrong
    /// argument count, invalid sort direction, missing primary key, ...).
    #[error("Invalid request{}: {message}", resource_suffix(.resource))]
    InvalidRequest {
        message: String,
        resource: Option<String>,
    },

    /// The configuration cannot be loaded. Only raised at startup.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The access-control table denied the requested permission.
    #[error("Access denied: {permission} on {alias}{}", resource_suffix(.resource))]
    AccessDenied {
        alias: String,
        resource: Option<String>,
        permission: Permission,
    },

    /// The alias is not configured.
    #[error("Unknown alias: {0}")]
    UnknownAlias(String),
}

fn resource_suffix(resource: &Option<String>) -> String {
    match resource {
        Some(r) => format!(" on resource '{r}'"),
        None => String::new(),
    }
}

impl RestError {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            resource: None,
        }
    }

    /// Create an invalid request error scoped to a resource
    pub fn invalid_request_on(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            resource: Some(resource.into()),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Attach a resource name to an invalid request error that has none.
    pub fn with_resource(self, name: &str) -> Self {
        match self {
            Self::InvalidRequest {
                message,
                resource: None,
            } => Self::InvalidRequest {
                message,
                resource: Some(name.to_string()),
            },
            other => other,
        }
    }

    /// Check if this is an invalid request error
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Check if this is an access denied error
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Errors the REST layer should answer with a 4xx status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::AccessDenied { .. } | Self::UnknownAlias(_)
        )
    }
}
