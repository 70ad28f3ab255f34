//! Plugin configuration errors.

use thiserror::Error;

/// Errors raised while registering or configuring an interceptor.
///
/// These are configuration errors: they surface when a signature registry is
/// built or properties are applied, never from a call on a wrapped target.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A signature names a method that does not exist on its capability.
    #[error("Could not find method on {capability} named {method}({})", args.join(", "))]
    UnresolvedSignature {
        capability: String,
        method: String,
        args: Vec<String>,
    },

    /// A signature is structurally invalid.
    #[error("Malformed signature on {capability}: {reason}")]
    MalformedSignature { capability: String, reason: String },

    /// An interceptor property is missing or has the wrong shape.
    #[error("Invalid property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_signature_message() {
        let err = PluginError::UnresolvedSignature {
            capability: "Executor".into(),
            method: "query".into(),
            args: vec!["Statement".into(), "Value".into()],
        };
        assert_eq!(
            err.to_string(),
            "Could not find method on Executor named query(Statement, Value)"
        );
    }

    #[test]
    fn test_invalid_property_message() {
        let err = PluginError::InvalidProperty {
            key: "prefix".into(),
            reason: "expected a string".into(),
        };
        assert_eq!(err.to_string(), "Invalid property 'prefix': expected a string");
    }
}
