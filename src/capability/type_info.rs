//! Registration-time type tables.
//!
//! A [`TypeInfo`] stands in for runtime type introspection. Each concrete
//! service type publishes one: its name, the capabilities it declares
//! directly, and optionally the `TypeInfo` of the type it extends.

use std::fmt;
use std::sync::Arc;

use super::Capability;

/// Capability table for one level of a type hierarchy.
#[derive(Clone)]
pub struct TypeInfo {
    name: String,
    interfaces: Vec<Capability>,
    parent: Option<Arc<TypeInfo>>,
}

impl TypeInfo {
    /// Create a root type with no declared interfaces.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            parent: None,
        }
    }

    /// Declare a capability directly at this level.
    ///
    /// Declaring the same capability twice is a no-op.
    pub fn with_interface(mut self, capability: Capability) -> Self {
        if !self.interfaces.contains(&capability) {
            self.interfaces.push(capability);
        }
        self
    }

    /// Set the type this one extends.
    pub fn with_parent(mut self, parent: Arc<TypeInfo>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capabilities declared directly at this level, in declaration order.
    pub fn interfaces(&self) -> &[Capability] {
        &self.interfaces
    }

    /// The type this one extends, if any.
    pub fn parent(&self) -> Option<&TypeInfo> {
        self.parent.as_deref()
    }

    /// This type followed by each ancestor, most specific first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether the type implements `capability` at any level, directly or
    /// through a capability that extends it.
    pub fn implements(&self, capability: &Capability) -> bool {
        self.ancestors()
            .flat_map(|ty| ty.interfaces.iter())
            .any(|cap| cap.is_a(capability))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field(
                "interfaces",
                &self.interfaces.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Iterator over a type and its ancestors. See [`TypeInfo::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeInfo>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
