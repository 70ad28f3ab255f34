//! Capability resolution.
//!
//! Given a target's [`TypeInfo`] and an interceptor's [`SignatureRegistry`],
//! compute the capabilities a dispatch wrapper must expose.

use std::collections::HashSet;

use super::{Capability, TypeInfo};
use crate::plugin::SignatureRegistry;

/// Capabilities of `type_info` that are keys of `registry`.
///
/// Walks the type and then each ancestor, most specific first, looking only
/// at interfaces declared directly at each level (the capabilities those
/// interfaces extend are not followed). The result is deduplicated, ordered
/// by level and then by declaration order within a level.
pub fn resolve_capabilities(type_info: &TypeInfo, registry: &SignatureRegistry) -> Vec<Capability> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut resolved = Vec::new();
    for level in type_info.ancestors() {
        for capability in level.interfaces() {
            if registry.contains_capability(capability) && seen.insert(capability.name()) {
                resolved.push(capability.clone());
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Signature;
    use std::sync::Arc;

    fn registry_for(signatures: &[Signature]) -> SignatureRegistry {
        SignatureRegistry::build(signatures).unwrap()
    }

    fn cap(name: &str) -> Capability {
        Capability::builder(name).method("run", Vec::<String>::new()).build()
    }

    #[test]
    fn test_empty_when_nothing_matches() {
        let a = cap("A");
        let b = cap("B");
        let registry = registry_for(&[Signature::new(&b, "run", Vec::<String>::new())]);
        let ty = TypeInfo::new("OnlyA").with_interface(a);
        assert!(resolve_capabilities(&ty, &registry).is_empty());
    }

    #[test]
    fn test_order_is_level_then_declaration() {
        let a = cap("A");
        let b = cap("B");
        let c = cap("C");
        let registry = registry_for(&[
            Signature::new(&a, "run", Vec::<String>::new()),
            Signature::new(&b, "run", Vec::<String>::new()),
            Signature::new(&c, "run", Vec::<String>::new()),
        ]);

        let base = Arc::new(TypeInfo::new("Base").with_interface(a.clone()));
        let leaf = TypeInfo::new("Leaf")
            .with_interface(c.clone())
            .with_interface(b.clone())
            .with_parent(base);

        let names: Vec<String> = resolve_capabilities(&leaf, &registry)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);

        // Stable across repeated calls.
        assert_eq!(
            resolve_capabilities(&leaf, &registry),
            resolve_capabilities(&leaf, &registry)
        );
    }

    #[test]
    fn test_capability_declared_twice_in_hierarchy_is_deduplicated() {
        let a = cap("A");
        let registry = registry_for(&[Signature::new(&a, "run", Vec::<String>::new())]);
        let base = Arc::new(TypeInfo::new("Base").with_interface(a.clone()));
        let leaf = TypeInfo::new("Leaf").with_interface(a).with_parent(base);
        assert_eq!(resolve_capabilities(&leaf, &registry).len(), 1);
    }

    #[test]
    fn test_super_capabilities_are_not_followed() {
        let base_cap = cap("Closeable");
        let sub = Capability::builder("Executor").extends(&base_cap).build();
        let registry = registry_for(&[Signature::new(&base_cap, "run", Vec::<String>::new())]);

        // Executor extends Closeable, but only Executor is declared on the type.
        let ty = TypeInfo::new("SimpleExecutor").with_interface(sub);
        assert!(ty.implements(&base_cap));
        assert!(resolve_capabilities(&ty, &registry).is_empty());
    }
}
