//! Signatures and the per-interceptor signature registry.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::capability::{Capability, Method};

use super::error::PluginError;

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Declares one method an interceptor wants to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    capability: Capability,
    method: String,
    args: Vec<String>,
}

impl Signature {
    /// Signature for `method` on `capability` taking parameters of the given
    /// type names.
    pub fn new<I, S>(capability: &Capability, method: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capability: capability.clone(),
            method: method.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Declared capability.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parameter type names.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn resolve(&self) -> Result<Method, PluginError> {
        if self.method.trim().is_empty() {
            return Err(PluginError::MalformedSignature {
                capability: self.capability.name().to_string(),
                reason: "method name is empty".to_string(),
            });
        }
        let params: Vec<&str> = self.args.iter().map(String::as_str).collect();
        self.capability
            .method(&self.method, &params)
            .ok_or_else(|| PluginError::UnresolvedSignature {
                capability: self.capability.name().to_string(),
                method: self.method.clone(),
                args: self.args.clone(),
            })
    }
}

// ---------------------------------------------------------------------------
// SignatureRegistry
// ---------------------------------------------------------------------------

/// Immutable map from capability to the set of methods to intercept on it.
#[derive(Clone, Default)]
pub struct SignatureRegistry {
    methods: HashMap<Capability, HashSet<Method>>,
}

impl SignatureRegistry {
    /// Resolve every signature and group the methods by declared capability.
    ///
    /// Fails on the first signature that is malformed or does not resolve to
    /// an existing method. Duplicate signatures collapse.
    pub fn build(signatures: &[Signature]) -> Result<Self, PluginError> {
        let mut methods: HashMap<Capability, HashSet<Method>> = HashMap::new();
        for sig in signatures {
            let method = sig.resolve()?;
            methods
                .entry(sig.capability.clone())
                .or_default()
                .insert(method);
        }
        let registry = Self { methods };
        log::debug!(
            "Built signature registry: {} capabilities, {} methods",
            registry.methods.len(),
            registry.len()
        );
        Ok(registry)
    }

    /// A registry that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Intercepted methods registered under `capability`.
    pub fn methods(&self, capability: &Capability) -> Option<&HashSet<Method>> {
        self.methods.get(capability)
    }

    /// Whether `capability` is a key of the registry.
    pub fn contains_capability(&self, capability: &Capability) -> bool {
        self.methods.contains_key(capability)
    }

    /// Whether a call to `method` must be routed to the interceptor.
    ///
    /// The lookup key is the capability that declares `method`.
    pub fn intercepts(&self, method: &Method) -> bool {
        self.methods
            .get(method.declaring())
            .is_some_and(|set| set.contains(method))
    }

    /// Registered capabilities, in no particular order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.methods.keys()
    }

    /// Total number of intercepted methods.
    pub fn len(&self) -> usize {
        self.methods.values().map(HashSet::len).sum()
    }

    /// Whether no method is intercepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SignatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (cap, methods) in &self.methods {
            map.entry(&cap.name(), &methods.len());
        }
        map.finish()
    }
}
