//! The interceptor contract.
//!
//! An interceptor declares which methods it wants through
//! [`Interceptor::signatures`] and handles every matching call in
//! [`Interceptor::intercept`]. All other calls on a wrapped target bypass it.
//!
//! # Example
//!
//! ```
//! use interpose::capability::Capability;
//! use interpose::plugin::{Interceptor, Invocation, Signature};
//! use serde_json::Value;
//!
//! struct Logged {
//!     greeter: Capability,
//! }
//!
//! impl Interceptor for Logged {
//!     fn signatures(&self) -> Vec<Signature> {
//!         vec![Signature::new(&self.greeter, "greet", ["String"])]
//!     }
//!
//!     fn intercept(&self, invocation: &Invocation<'_>) -> anyhow::Result<Value> {
//!         let result = invocation.proceed()?;
//!         Ok(Value::from(format!("[logged] {}", result.as_str().unwrap_or_default())))
//!     }
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::error::PluginError;
use super::invocation::Invocation;
use super::properties::Properties;
use super::signature::Signature;
use super::wrapper::Plugin;
use crate::target::Target;

/// Behavior injected around matching calls on a target.
///
/// Interceptors are shared by every wrapper built from them and may be
/// called from several threads at once.
pub trait Interceptor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Methods this interceptor wants to see.
    ///
    /// Read once, when the interceptor is registered.
    fn signatures(&self) -> Vec<Signature>;

    /// Handle a matching call.
    ///
    /// Call [`Invocation::proceed`] to reach the inner target. Returning
    /// without proceeding short-circuits the call.
    fn intercept(&self, invocation: &Invocation<'_>) -> anyhow::Result<Value>;

    /// Wrap `target` with this interceptor.
    ///
    /// Override to decorate differently or to leave some targets unwrapped;
    /// the default performs the standard [`Plugin::wrap`].
    fn plugin(&self, target: Arc<dyn Target>, plugin: &Plugin) -> Arc<dyn Target> {
        plugin.wrap(target)
    }

    /// Receive configuration before registration. Defaults to ignoring it.
    fn set_properties(&mut self, _properties: &Properties) -> Result<(), PluginError> {
        Ok(())
    }
}
