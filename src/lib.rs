//! # interpose
//!
//! A runtime interception layer for capability-typed service objects.
//!
//! Service objects implement [`Target`] and describe their capabilities with
//! a [`TypeInfo`] table. Interceptors declare, via [`Signature`]s, the exact
//! methods they want to observe. [`wrap`] builds a decorator around a target
//! that routes those methods through the interceptor and forwards all other
//! calls unchanged; [`InterceptorChain`] applies several interceptors in
//! registration order.
//!
//! ```
//! use std::sync::Arc;
//! use interpose::{wrap, Capability, Interceptor, Invocation, Method, Signature, Target, TargetExt, TypeInfo};
//! use serde_json::{json, Value};
//!
//! struct Hello {
//!     type_info: TypeInfo,
//! }
//!
//! impl Target for Hello {
//!     fn type_info(&self) -> &TypeInfo {
//!         &self.type_info
//!     }
//!
//!     fn invoke(&self, method: &Method, args: &[Value]) -> anyhow::Result<Value> {
//!         let name: String = interpose::target::arg(args, 0, method)?;
//!         Ok(json!(format!("Hello, {name}")))
//!     }
//! }
//!
//! struct Logged(Capability);
//!
//! impl Interceptor for Logged {
//!     fn signatures(&self) -> Vec<Signature> {
//!         vec![Signature::new(&self.0, "greet", ["String"])]
//!     }
//!
//!     fn intercept(&self, invocation: &Invocation<'_>) -> anyhow::Result<Value> {
//!         let inner = invocation.proceed()?;
//!         Ok(json!(format!("[logged] {}", inner.as_str().unwrap_or_default())))
//!     }
//! }
//!
//! let greeter = Capability::builder("Greeter").method("greet", ["String"]).build();
//! let target = Arc::new(Hello {
//!     type_info: TypeInfo::new("Hello").with_interface(greeter.clone()),
//! });
//!
//! let wrapped = wrap(target, Arc::new(Logged(greeter.clone()))).unwrap();
//! let greet = greeter.method("greet", &["String"]).unwrap();
//! let out: String = wrapped.call(&greet, &[json!("Bob")]).unwrap();
//! assert_eq!(out, "[logged] Hello, Bob");
//! ```

pub mod capability;
pub mod plugin;
pub mod target;

#[cfg(test)]
mod testing;

pub use capability::{resolve_capabilities, Capability, Method, TypeInfo};
pub use plugin::{
    wrap, DispatchWrapper, Interceptor, InterceptorChain, Invocation, Plugin, PluginError,
    Properties, Signature, SignatureRegistry,
};
pub use target::{same_target, Target, TargetError, TargetExt};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
