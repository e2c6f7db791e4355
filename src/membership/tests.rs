//! Membership Module Tests
//!
//! Validates backend identities and the thread-safe registry that owns the ring.
//!
//! ## Test Scopes
//! - **Backend**: identity, ordering and serialization of backend addresses.
//! - **Registry**: read-your-writes mutation results, idempotent add/delete,
//!   and concurrent mutation from many threads.

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::membership::registry::MembershipRegistry;
    use crate::membership::types::{Backend, join_backends};
    use crate::ring::DEFAULT_VIRTUAL_NODES;
    use std::collections::HashSet;
    use std::sync::Arc;

    // ============================================================
    // BACKEND TESTS
    // ============================================================

    #[test]
    fn test_backend_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(Backend::from("cache-1:8080"));
        set.insert(Backend::new("cache-1:8080".to_string()));
        set.insert(Backend::from("cache-2:8080"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_backend_serializes_as_plain_string() {
        let backend = Backend::from("10.1.2.3:6081");

        let json = serde_json::to_string(&backend).expect("Serialization failed");
        assert_eq!(json, "\"10.1.2.3:6081\"");

        let restored: Backend = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(restored, backend);
    }

    #[test]
    fn test_join_backends() {
        let list = vec![Backend::from("a:1"), Backend::from("b:2")];

        assert_eq!(join_backends(&list), "a:1,b:2");
        assert_eq!(join_backends(&[]), "");
    }

    // ============================================================
    // REGISTRY TESTS
    // ============================================================

    #[test]
    fn test_registry_starts_empty() {
        let registry = MembershipRegistry::new(DEFAULT_VIRTUAL_NODES);

        assert!(registry.is_empty());
        assert!(matches!(registry.get_n("/a", 3), Err(Error::EmptyRing)));
    }

    #[test]
    fn test_registry_seeded_members() {
        let registry = MembershipRegistry::with_members(
            DEFAULT_VIRTUAL_NODES,
            vec![Backend::from("b:80"), Backend::from("a:80")],
        );

        assert_eq!(registry.list_joined(), "a:80,b:80");
    }

    #[test]
    fn test_add_returns_post_mutation_members() {
        let registry = MembershipRegistry::new(DEFAULT_VIRTUAL_NODES);

        let after_first = registry.add(Backend::from("a:80"));
        assert_eq!(after_first, vec![Backend::from("a:80")]);

        let after_second = registry.add(Backend::from("b:80"));
        assert_eq!(after_second, vec![Backend::from("a:80"), Backend::from("b:80")]);
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let registry = MembershipRegistry::new(DEFAULT_VIRTUAL_NODES);

        registry.add(Backend::from("b5:80"));
        let members = registry.add(Backend::from("b5:80"));

        assert_eq!(members, vec![Backend::from("b5:80")]);
        assert_eq!(
            registry.snapshot().positions_of(&Backend::from("b5:80")),
            DEFAULT_VIRTUAL_NODES
        );
    }

    #[test]
    fn test_remove_returns_post_mutation_members() {
        let registry = MembershipRegistry::with_members(
            DEFAULT_VIRTUAL_NODES,
            vec![Backend::from("a:80"), Backend::from("b:80")],
        );

        let members = registry.remove(&Backend::from("a:80"));

        assert_eq!(members, vec![Backend::from("b:80")]);
    }

    #[test]
    fn test_remove_unknown_is_idempotent() {
        let registry = MembershipRegistry::with_members(
            DEFAULT_VIRTUAL_NODES,
            vec![Backend::from("a:80")],
        );

        let members = registry.remove(&Backend::from("missing:80"));

        assert_eq!(members, vec![Backend::from("a:80")]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = MembershipRegistry::with_members(
            DEFAULT_VIRTUAL_NODES,
            vec![Backend::from("a:80")],
        );

        let snapshot = registry.snapshot();
        registry.add(Backend::from("b:80"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_mutations_all_land() {
        let registry = MembershipRegistry::new(DEFAULT_VIRTUAL_NODES);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for i in 0..25 {
                        registry.add(Backend::new(format!("node-{}-{}:80", worker, i)));
                        // Lookups interleave with writers.
                        let _ = registry.get_n("/hot/key", 3);
                    }
                });
            }
        });

        assert_eq!(registry.len(), 200);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for i in 0..25 {
                        registry.remove(&Backend::new(format!("node-{}-{}:80", worker, i)));
                    }
                });
            }
        });

        assert!(registry.is_empty());
    }
}
