//! Ordered interceptor registration and chain assembly.

use std::sync::Arc;

use super::error::PluginError;
use super::interceptor::Interceptor;
use super::properties::Properties;
use super::wrapper::Plugin;
use crate::target::Target;

/// Interceptors in registration order.
///
/// Each interceptor's signatures are resolved when it is added, so a bad
/// signature is reported at registration rather than on first use.
/// [`plugin_all`](Self::plugin_all) wraps a target with every interceptor in
/// turn; the last one registered ends up outermost.
#[derive(Debug, Clone, Default)]
pub struct InterceptorChain {
    plugins: Vec<Plugin>,
}

impl InterceptorChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor.
    pub fn add_interceptor(&mut self, interceptor: impl Interceptor + 'static) -> Result<(), PluginError> {
        self.add_shared(Arc::new(interceptor))
    }

    /// Register an interceptor that is already shared elsewhere.
    pub fn add_shared(&mut self, interceptor: Arc<dyn Interceptor>) -> Result<(), PluginError> {
        self.plugins.push(Plugin::new(interceptor)?);
        Ok(())
    }

    /// Apply `properties` to `interceptor`, then register it.
    pub fn add_configured<I: Interceptor + 'static>(
        &mut self,
        mut interceptor: I,
        properties: &Properties,
    ) -> Result<(), PluginError> {
        if let Err(e) = interceptor.set_properties(properties) {
            log::warn!("Failed to configure interceptor {}: {}", interceptor.name(), e);
            return Err(e);
        }
        self.add_interceptor(interceptor)
    }

    /// Wrap `target` with every registered interceptor, in registration order.
    pub fn plugin_all(&self, target: Arc<dyn Target>) -> Arc<dyn Target> {
        self.plugins
            .iter()
            .fold(target, |current, plugin| plugin.apply(current))
    }

    /// Registered interceptors, in registration order.
    pub fn interceptors(&self) -> impl ExactSizeIterator<Item = &Arc<dyn Interceptor>> {
        self.plugins.iter().map(Plugin::interceptor)
    }

    /// Registered plugins, in registration order.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no interceptor is registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
