//! Dispatch wrappers and the `wrap` entry point.
//!
//! Wrapping a target with an interceptor resolves which of the target's
//! capabilities the interceptor's registry names. If none match, the target
//! comes back unchanged (same allocation). Otherwise a [`DispatchWrapper`]
//! is built around it. The wrapper exposes exactly the matched capabilities
//! in its own [`TypeInfo`], routes registered methods to the interceptor and
//! forwards every other call to the inner target untouched.
//!
//! ```text
//! caller ──▶ DispatchWrapper(B) ──▶ DispatchWrapper(A) ──▶ target
//!              │ matched?             │ matched?
//!              └─▶ B.intercept        └─▶ A.intercept
//!                   └─ proceed ──────────▶ ...
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::error::PluginError;
use super::interceptor::Interceptor;
use super::invocation::Invocation;
use super::signature::SignatureRegistry;
use crate::capability::{resolve_capabilities, Capability, Method, TypeInfo};
use crate::target::Target;

/// Wrap `target` with `interceptor`.
///
/// Builds the interceptor's signature registry first; an unresolvable
/// signature fails here, before anything is wrapped.
pub fn wrap(
    target: Arc<dyn Target>,
    interceptor: Arc<dyn Interceptor>,
) -> Result<Arc<dyn Target>, PluginError> {
    Ok(Plugin::new(interceptor)?.wrap(target))
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// An interceptor paired with its built signature registry.
#[derive(Clone)]
pub struct Plugin {
    interceptor: Arc<dyn Interceptor>,
    registry: Arc<SignatureRegistry>,
}

impl Plugin {
    /// Register `interceptor`, resolving all of its signatures.
    pub fn new(interceptor: Arc<dyn Interceptor>) -> Result<Self, PluginError> {
        let registry = SignatureRegistry::build(&interceptor.signatures())?;
        log::debug!(
            "Registered interceptor {} ({} intercepted methods)",
            interceptor.name(),
            registry.len()
        );
        Ok(Self {
            interceptor,
            registry: Arc::new(registry),
        })
    }

    /// The registered interceptor.
    pub fn interceptor(&self) -> &Arc<dyn Interceptor> {
        &self.interceptor
    }

    /// Signatures resolved at registration.
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Standard wrap: a new [`DispatchWrapper`] around `target` if any of its
    /// capabilities is registered, otherwise `target` itself.
    pub fn wrap(&self, target: Arc<dyn Target>) -> Arc<dyn Target> {
        let capabilities = resolve_capabilities(target.type_info(), &self.registry);
        if capabilities.is_empty() {
            log::debug!(
                "Interceptor {} does not apply to {}; leaving it unwrapped",
                self.interceptor.name(),
                target.type_info().name()
            );
            return target;
        }
        log::debug!(
            "Wrapping {} with interceptor {} for [{}]",
            target.type_info().name(),
            self.interceptor.name(),
            capabilities
                .iter()
                .map(Capability::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Arc::new(DispatchWrapper::new(
            target,
            Arc::clone(&self.interceptor),
            Arc::clone(&self.registry),
            capabilities,
        ))
    }

    /// Wrap through the interceptor's [`Interceptor::plugin`] hook.
    pub fn apply(&self, target: Arc<dyn Target>) -> Arc<dyn Target> {
        self.interceptor.plugin(target, self)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("interceptor", &self.interceptor.name())
            .field("registry", &self.registry)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DispatchWrapper
// ---------------------------------------------------------------------------

/// A forwarding [`Target`] that routes registered methods to an interceptor.
pub struct DispatchWrapper {
    inner: Arc<dyn Target>,
    interceptor: Arc<dyn Interceptor>,
    registry: Arc<SignatureRegistry>,
    type_info: TypeInfo,
}

impl DispatchWrapper {
    fn new(
        inner: Arc<dyn Target>,
        interceptor: Arc<dyn Interceptor>,
        registry: Arc<SignatureRegistry>,
        capabilities: Vec<Capability>,
    ) -> Self {
        let type_info = capabilities.into_iter().fold(
            TypeInfo::new(format!("Proxy<{}>", inner.type_info().name())),
            TypeInfo::with_interface,
        );
        Self {
            inner,
            interceptor,
            registry,
            type_info,
        }
    }

    /// Whether `method` belongs to a capability this wrapper exposes.
    fn exposes(&self, method: &Method) -> bool {
        self.type_info
            .interfaces()
            .iter()
            .any(|cap| cap.is_a_named(method.declaring()))
    }
}

impl Target for DispatchWrapper {
    fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    fn invoke(&self, method: &Method, args: &[Value]) -> anyhow::Result<Value> {
        if self.registry.intercepts(method) && self.exposes(method) {
            log::trace!("{} -> interceptor {}", method, self.interceptor.name());
            return self
                .interceptor
                .intercept(&Invocation::new(&self.inner, method, args));
        }
        log::trace!("{} -> {}", method, self.inner.type_info().name());
        self.inner.invoke(method, args)
    }
}

impl fmt::Debug for DispatchWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchWrapper")
            .field("type_info", &self.type_info)
            .field("interceptor", &self.interceptor.name())
            .finish()
    }
}
