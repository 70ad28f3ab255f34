//! Capability interfaces and method descriptors.
//!
//! A [`Capability`] is a named interface: a set of methods a service object
//! may expose. Capabilities are plain values built at registration time, so
//! the interception layer never needs runtime reflection to learn what a
//! service can do. Concrete service types describe themselves with a
//! [`TypeInfo`] table listing the capabilities declared at each level of
//! their hierarchy.
//!
//! # Example
//!
//! ```
//! use interpose::capability::{Capability, TypeInfo};
//!
//! let greeter = Capability::builder("Greeter")
//!     .method("greet", ["String"])
//!     .build();
//!
//! let service = TypeInfo::new("HelloService").with_interface(greeter.clone());
//! assert!(service.implements(&greeter));
//!
//! let greet = greeter.method("greet", &["String"]).unwrap();
//! assert_eq!(greet.declaring(), "Greeter");
//! ```

pub mod resolver;
pub mod type_info;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use resolver::resolve_capabilities;
pub use type_info::TypeInfo;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// Descriptor of a single method on a capability.
///
/// Two descriptors are equal when the declaring capability, the method name
/// and the parameter-type list all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    declaring: String,
    name: String,
    params: Vec<String>,
}

impl Method {
    fn new(declaring: &str, name: &str, params: &[String]) -> Self {
        Self {
            declaring: declaring.to_string(),
            name: name.to_string(),
            params: params.to_vec(),
        }
    }

    /// Name of the capability that declares this method.
    pub fn declaring(&self) -> &str {
        &self.declaring
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type names, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    fn matches(&self, name: &str, params: &[&str]) -> bool {
        self.name == name
            && self.params.len() == params.len()
            && self.params.iter().zip(params).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({})", self.declaring, self.name, self.params.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

struct CapabilityDef {
    name: String,
    extends: Vec<Capability>,
    methods: Vec<Method>,
}

/// A named capability interface.
///
/// `Capability` is a cheap, clonable handle. Identity is the name: two
/// handles with the same name denote the same capability.
#[derive(Clone)]
pub struct Capability(Arc<CapabilityDef>);

impl Capability {
    /// Start building a capability with the given name.
    pub fn builder(name: impl Into<String>) -> CapabilityBuilder {
        CapabilityBuilder {
            name: name.into(),
            extends: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Capability name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Capabilities this one directly extends, in declaration order.
    pub fn extends(&self) -> &[Capability] {
        &self.0.extends
    }

    /// Methods declared directly on this capability.
    pub fn declared_methods(&self) -> &[Method] {
        &self.0.methods
    }

    /// Look up a method by name and parameter types.
    ///
    /// Methods declared on this capability are searched first, then each
    /// extended capability depth-first in declaration order. The returned
    /// descriptor names the capability that actually declares the method.
    pub fn method(&self, name: &str, params: &[&str]) -> Option<Method> {
        if let Some(found) = self.0.methods.iter().find(|m| m.matches(name, params)) {
            return Some(found.clone());
        }
        self.0.extends.iter().find_map(|sup| sup.method(name, params))
    }

    /// Whether `other` is this capability or one of its (transitive) supers.
    pub fn is_a(&self, other: &Capability) -> bool {
        self.is_a_named(other.name())
    }

    /// Whether the capability called `name` is this one or one of its
    /// (transitive) supers.
    pub fn is_a_named(&self, name: &str) -> bool {
        self.name() == name || self.0.extends.iter().any(|sup| sup.is_a_named(name))
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        self.name()
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.0.name)
            .field(
                "extends",
                &self.0.extends.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("methods", &self.0.methods.len())
            .finish()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for [`Capability`].
#[derive(Debug)]
pub struct CapabilityBuilder {
    name: String,
    extends: Vec<Capability>,
    methods: Vec<Method>,
}

impl CapabilityBuilder {
    /// Declare that the capability extends `parent`.
    pub fn extends(mut self, parent: &Capability) -> Self {
        self.extends.push(parent.clone());
        self
    }

    /// Declare a method with the given parameter type names.
    ///
    /// Redeclaring an identical method is a no-op.
    pub fn method<I, S>(mut self, name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params: Vec<String> = params.into_iter().map(Into::into).collect();
        let method = Method::new(&self.name, name, &params);
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Finish the capability.
    pub fn build(self) -> Capability {
        Capability(Arc::new(CapabilityDef {
            name: self.name,
            extends: self.extends,
            methods: self.methods,
        }))
    }
}
