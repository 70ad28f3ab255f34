//! Service objects that can be wrapped.
//!
//! Anything that implements [`Target`] can sit at the core of an interceptor
//! chain. A target publishes its [`TypeInfo`] and answers calls through a
//! single [`Target::invoke`] entry point. Dispatch wrappers implement
//! `Target` as well, so wrapping composes.
//!
//! Arguments and results travel as [`serde_json::Value`]. [`TargetExt::call`]
//! and [`arg`] convert at the edges so callers and target authors work with
//! concrete types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::capability::{Method, TypeInfo};

/// A service object reachable through the interception layer.
pub trait Target: Send + Sync {
    /// Capability table of the object's concrete type.
    fn type_info(&self) -> &TypeInfo;

    /// Perform `method` with `args`.
    ///
    /// Errors are returned as-is to the caller; wrappers never re-wrap them.
    fn invoke(&self, method: &Method, args: &[Value]) -> anyhow::Result<Value>;
}

/// Typed calls on any [`Target`].
pub trait TargetExt {
    /// Invoke `method` and deserialize the result into `R`.
    ///
    /// An error from the call is returned untouched; only a result that
    /// fails to deserialize produces a new error.
    fn call<R: DeserializeOwned>(&self, method: &Method, args: &[Value]) -> anyhow::Result<R>;
}

impl<T: Target + ?Sized> TargetExt for T {
    fn call<R: DeserializeOwned>(&self, method: &Method, args: &[Value]) -> anyhow::Result<R> {
        let value = self.invoke(method, args)?;
        serde_json::from_value(value).map_err(|e| {
            anyhow::Error::new(e).context(format!("Invalid result returned by {}", method))
        })
    }
}

/// Whether two handles point at the same object.
///
/// Compares addresses only, so it is reliable across trait-object vtables.
pub fn same_target(a: &Arc<dyn Target>, b: &Arc<dyn Target>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Errors a target implementation may raise for malformed calls.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The target does not implement the requested method.
    #[error("Method {method} is not supported by {target}")]
    UnsupportedMethod { method: String, target: String },

    /// Fewer arguments than the method declares.
    #[error("Missing argument {index} for {method}")]
    MissingArgument { method: String, index: usize },

    /// An argument could not be converted to the declared type.
    #[error("Invalid argument {index} for {method}: {reason}")]
    InvalidArgument {
        method: String,
        index: usize,
        reason: String,
    },
}

impl TargetError {
    /// Convenience constructor for [`TargetError::UnsupportedMethod`].
    pub fn unsupported(method: &Method, type_info: &TypeInfo) -> Self {
        Self::UnsupportedMethod {
            method: method.to_string(),
            target: type_info.name().to_string(),
        }
    }
}

/// Extract and deserialize argument `index` of a call to `method`.
pub fn arg<T: DeserializeOwned>(args: &[Value], index: usize, method: &Method) -> Result<T, TargetError> {
    let value = args.get(index).ok_or_else(|| TargetError::MissingArgument {
        method: method.to_string(),
        index,
    })?;
    T::deserialize(value).map_err(|e| TargetError::InvalidArgument {
        method: method.to_string(),
        index,
        reason: e.to_string(),
    })
}
