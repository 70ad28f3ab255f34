//! A single intercepted call.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::capability::Method;
use crate::target::{arg, Target, TargetError};

/// The call an interceptor is asked to handle.
///
/// Borrows the inner target, the method descriptor and the caller's
/// arguments for the duration of one call. [`proceed`](Self::proceed) runs the
/// call against the next layer inward; an interceptor may call it once,
/// several times, or not at all.
pub struct Invocation<'a> {
    target: &'a Arc<dyn Target>,
    method: &'a Method,
    args: &'a [Value],
}

impl<'a> Invocation<'a> {
    /// Describe a call of `method` with `args` on `target`.
    pub fn new(target: &'a Arc<dyn Target>, method: &'a Method, args: &'a [Value]) -> Self {
        Self { target, method, args }
    }

    /// The next layer inward: another wrapper or the real object.
    pub fn target(&self) -> &Arc<dyn Target> {
        self.target
    }

    /// The method being called.
    pub fn method(&self) -> &Method {
        self.method
    }

    /// The caller's arguments.
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Deserialize argument `index`.
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> Result<T, TargetError> {
        arg(self.args, index, self.method)
    }

    /// Perform the original call on the inner target.
    pub fn proceed(&self) -> anyhow::Result<Value> {
        self.target.invoke(self.method, self.args)
    }

    /// Perform the call on the inner target with replacement arguments.
    pub fn proceed_with(&self, args: &[Value]) -> anyhow::Result<Value> {
        self.target.invoke(self.method, args)
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("target", &self.target.type_info().name())
            .field("method", &self.method.to_string())
            .field("args", &self.args)
            .finish()
    }
}
