//! Interceptors, signature registries, dispatch wrappers and chains.
//!
//! # Flow
//!
//! 1. An [`Interceptor`] lists the methods it wants as [`Signature`]s.
//! 2. Registering it ([`Plugin::new`], [`InterceptorChain::add_interceptor`])
//!    resolves those signatures into a [`SignatureRegistry`]. A signature
//!    that names a missing method is a [`PluginError`] right away.
//! 3. [`Plugin::wrap`] (or the free function [`wrap`]) puts a
//!    [`DispatchWrapper`] around a target when at least one of the target's
//!    capabilities is registered, and returns the target itself otherwise.
//! 4. Registered calls reach [`Interceptor::intercept`] as an [`Invocation`];
//!    everything else goes straight to the inner target.

pub mod chain;
pub mod error;
pub mod interceptor;
pub mod invocation;
pub mod properties;
pub mod signature;
pub mod wrapper;

pub use chain::InterceptorChain;
pub use error::PluginError;
pub use interceptor::Interceptor;
pub use invocation::Invocation;
pub use properties::Properties;
pub use signature::{Signature, SignatureRegistry};
pub use wrapper::{wrap, DispatchWrapper, Plugin};
