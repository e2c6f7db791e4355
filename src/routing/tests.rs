//! Routing Module Tests
//!
//! Validates primary/alternate selection and the alternate shuffle.
//!
//! ## Test Scopes
//! - **Preset lists**: precedence over the ring, order preservation, blank headers.
//! - **Ring selection**: primary affinity, alternates as a permutation, replica floor.
//! - **Randomness**: seeded routers are reproducible, the shuffle really permutes.

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::membership::registry::MembershipRegistry;
    use crate::membership::types::Backend;
    use crate::ring::DEFAULT_VIRTUAL_NODES;
    use crate::routing::router::shuffle;
    use crate::routing::{Router, SelectionSource};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn registry_with(names: &[&str]) -> Arc<MembershipRegistry> {
        MembershipRegistry::with_members(
            DEFAULT_VIRTUAL_NODES,
            names.iter().map(|name| Backend::from(*name)),
        )
    }

    // ============================================================
    // PRESET LISTS
    // ============================================================

    #[test]
    fn test_preset_header_takes_precedence() {
        let registry = registry_with(&["b1", "b2", "b3", "b4"]);
        let router = Router::new(registry, 3);

        let selection = router.route("/movie.mp4", Some("b2,b3")).unwrap();

        assert_eq!(selection.primary, Backend::from("b2"));
        assert_eq!(selection.alternates, vec![Backend::from("b3")]);
        assert_eq!(selection.source, SelectionSource::Preset);
    }

    #[test]
    fn test_preset_does_not_need_the_ring() {
        // An empty ring would fail any lookup, so success proves no lookup happened.
        let router = Router::new(MembershipRegistry::new(DEFAULT_VIRTUAL_NODES), 3);

        let selection = router.route("/a", Some("x:1,y:2,z:3")).unwrap();

        assert_eq!(selection.primary, Backend::from("x:1"));
        assert_eq!(selection.alternates, vec![Backend::from("y:2"), Backend::from("z:3")]);
    }

    #[test]
    fn test_preset_order_is_never_shuffled() {
        let router = Router::new(registry_with(&["a"]), 3);

        for _ in 0..50 {
            let selection = router.route("/a", Some("p,q,r,s,t")).unwrap();
            assert_eq!(
                selection.alternates,
                vec![
                    Backend::from("q"),
                    Backend::from("r"),
                    Backend::from("s"),
                    Backend::from("t")
                ]
            );
        }
    }

    #[test]
    fn test_preset_is_not_truncated_to_replicas() {
        let router = Router::new(registry_with(&["a"]), 1);

        let selection = router.route("/a", Some("p,q,r")).unwrap();

        assert_eq!(selection.alternates.len(), 2);
    }

    #[test]
    fn test_single_entry_preset_has_no_alternates() {
        let router = Router::new(registry_with(&["a"]), 3);

        let selection = router.route("/a", Some("only:80")).unwrap();

        assert_eq!(selection.primary, Backend::from("only:80"));
        assert!(selection.alternates.is_empty());
    }

    #[test]
    fn test_blank_preset_falls_through_to_ring() {
        let registry = registry_with(&["b1", "b2", "b3", "b4"]);
        let expected_primary = registry.get_n("/page", 1).unwrap()[0].clone();
        let router = Router::new(registry, 3);

        for blank in ["", "   ", ",", " , "] {
            let selection = router.route("/page", Some(blank)).unwrap();
            assert_eq!(selection.source, SelectionSource::Ring);
            assert_eq!(selection.primary, expected_primary);
        }
    }

    // ============================================================
    // RING SELECTION
    // ============================================================

    #[test]
    fn test_empty_ring_fails() {
        let router = Router::new(MembershipRegistry::new(DEFAULT_VIRTUAL_NODES), 3);

        assert!(matches!(router.route("/a", None), Err(Error::EmptyRing)));
        assert!(matches!(router.route("/a", Some(" ")), Err(Error::EmptyRing)));
    }

    #[test]
    fn test_primary_is_ring_owner() {
        let registry = registry_with(&["b1", "b2", "b3", "b4", "b5"]);
        let router = Router::new(registry.clone(), 3);

        for i in 0..200 {
            let key = format!("/objects/{}", i);
            let owners = registry.get_n(&key, 3).unwrap();
            let selection = router.route(&key, None).unwrap();

            assert_eq!(selection.primary, owners[0]);

            let expected: HashSet<_> = owners[1..].iter().cloned().collect();
            let actual: HashSet<_> = selection.alternates.iter().cloned().collect();
            assert_eq!(selection.alternates.len(), 2);
            assert_eq!(actual, expected, "Alternates must be the ring's fallbacks");
        }
    }

    #[test]
    fn test_selection_capped_by_member_count() {
        let router = Router::new(registry_with(&["b1", "b2"]), 3);

        let selection = router.route("/a", None).unwrap();

        assert_eq!(selection.alternates.len(), 1);
        assert_ne!(selection.primary, selection.alternates[0]);
    }

    #[test]
    fn test_zero_replicas_is_clamped() {
        let router = Router::new(registry_with(&["b1", "b2"]), 0);

        assert_eq!(router.replicas(), 1);
        let selection = router.route("/a", None).unwrap();
        assert!(selection.alternates.is_empty());
    }

    // ============================================================
    // RANDOMNESS
    // ============================================================

    #[test]
    fn test_seeded_routers_are_reproducible() {
        let registry = registry_with(&["b1", "b2", "b3", "b4", "b5", "b6"]);
        let first = Router::with_seed(registry.clone(), 5, 42);
        let second = Router::with_seed(registry, 5, 42);

        for i in 0..100 {
            let key = format!("/k/{}", i);
            assert_eq!(
                first.route(&key, None).unwrap(),
                second.route(&key, None).unwrap()
            );
        }
    }

    #[test]
    fn test_alternates_order_varies() {
        let registry = registry_with(&["b1", "b2", "b3", "b4"]);
        let router = Router::new(registry, 3);

        let orders: HashSet<Vec<Backend>> = (0..200)
            .map(|_| router.route("/popular", None).unwrap().alternates)
            .collect();

        assert_eq!(orders.len(), 2, "Both orders of two alternates should appear");
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut list: Vec<u32> = (0..32).collect();

        shuffle(&mut list, &mut rng);

        let mut sorted = list.clone();
        sorted.sort();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_short_lists() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = vec![];
        let mut single = vec![9u8];

        shuffle(&mut empty, &mut rng);
        shuffle(&mut single, &mut rng);

        assert!(empty.is_empty());
        assert_eq!(single, vec![9]);
    }
}
