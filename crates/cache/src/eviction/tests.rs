//! Tests for eviction policies

use super::*;
use crate::errors::{CacheError, RecoveryHint};
use crate::item::CacheItem;
use crate::serialization::{JsonSerializer, ValueSerializer};
use crate::store::{MemoryStorage, OrderedStorage, StorageAdapter};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

type Key = &'static str;
type Store = MemoryStorage<Key, u32>;
type Ordered = OrderedStorage<Key, u32>;

fn item(value: u32) -> CacheItem<Key, u32> {
    CacheItem::new(JsonSerializer.serialize(&value).unwrap())
}

fn frequency(storage: &dyn StorageAdapter<Key, u32>, key: Key) -> Option<u64> {
    storage.get(&key).and_then(|item| item.frequency)
}

fn all_policies() -> Vec<Box<dyn EvictionPolicy<Key, u32>>> {
    vec![
        Box::new(LfuPolicy::new()),
        Box::new(LruPolicy::<Key>::new()),
        Box::new(FifoPolicy::<Key>::new()),
    ]
}

#[test]
fn test_lfu_insert_resets_frequency() {
    let mut storage = Store::new();
    let mut policy = LfuPolicy::new();

    policy.on_insert(&mut storage, "a", item(1).with_frequency(42));
    assert_eq!(frequency(&storage, "a"), Some(1));

    policy.on_access(&mut storage, &"a");
    policy.on_access(&mut storage, &"a");
    assert_eq!(frequency(&storage, "a"), Some(3));

    // Insert is authoritative, not additive
    policy.on_insert(&mut storage, "a", item(2));
    assert_eq!(frequency(&storage, "a"), Some(1));
    assert_eq!(storage.get(&"a").unwrap().value, "2");
}

#[test]
fn test_lfu_access_on_unset_frequency_starts_from_zero() {
    let mut storage = Store::new();
    let mut policy = LfuPolicy::new();

    storage.set("raw", item(1));
    policy.on_access(&mut storage, &"raw");
    assert_eq!(frequency(&storage, "raw"), Some(1));
}

#[test]
fn test_lfu_access_saturates_at_max_frequency() {
    let mut storage = Ordered::new();
    let mut policy = LfuPolicy::new();

    storage.set("hot", item(1).with_frequency(u64::MAX));
    storage.set("cold", item(2).with_frequency(5));
    policy.on_access(&mut storage, &"hot");
    assert_eq!(frequency(&storage, "hot"), Some(u64::MAX));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("cold"));
}

#[test]
fn test_missing_keys_are_noops() {
    for mut policy in all_policies() {
        let mut storage = Ordered::new();
        policy.on_insert(&mut storage, "a", item(1));
        policy.on_access(&mut storage, &"a");
        let before = frequency(&storage, "a");

        policy.on_access(&mut storage, &"missing");
        policy.on_remove(&mut storage, &"missing");

        assert_eq!(storage.len(), 1, "{} changed storage", policy.name());
        assert_eq!(frequency(&storage, "a"), before);
        assert!(storage.get(&"missing").is_none());
    }
}

#[test]
fn test_evict_on_empty_storage() {
    for mut policy in all_policies() {
        let mut storage = Store::new();
        assert_eq!(policy.evict(&mut storage).unwrap(), None);
        assert!(storage.is_empty());
    }
}

#[test]
fn test_evict_removes_exactly_one_entry() {
    for mut policy in all_policies() {
        let mut storage = Store::new();
        for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
            policy.on_insert(&mut storage, key, item(value));
        }

        let victim = policy.evict(&mut storage).unwrap().unwrap();
        assert_eq!(storage.len(), 2, "{} removed the wrong count", policy.name());
        assert!(!storage.contains(&victim));
    }
}

#[test]
fn test_lfu_eviction_order_with_priorities() {
    let mut storage = Ordered::new();
    let mut policy = LfuPolicy::new();

    policy.on_insert(&mut storage, "A", item(1).with_priority(2));
    policy.on_insert(&mut storage, "B", item(2).with_priority(1));
    policy.on_insert(&mut storage, "C", item(3).with_priority(2));

    policy.on_access(&mut storage, &"A");
    policy.on_access(&mut storage, &"A");
    policy.on_access(&mut storage, &"B");

    assert_eq!(frequency(&storage, "A"), Some(3));
    assert_eq!(frequency(&storage, "B"), Some(2));
    assert_eq!(frequency(&storage, "C"), Some(1));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("C"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("B"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("A"));
    assert_eq!(policy.evict(&mut storage).unwrap(), None);
}

#[test]
fn test_lfu_priority_breaks_frequency_ties() {
    let mut storage = Ordered::new();
    let mut policy = LfuPolicy::new();

    policy.on_insert(&mut storage, "high", item(1).with_priority(5));
    policy.on_insert(&mut storage, "unset", item(2));
    policy.on_insert(&mut storage, "low", item(3).with_priority(-1));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("low"));
    // Unset priority ranks as 0
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("unset"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("high"));
}

#[test]
fn test_lfu_full_tie_keeps_first_in_scan_order() {
    let build = || {
        let mut storage = Ordered::new();
        let mut policy = LfuPolicy::new();
        policy.on_insert(&mut storage, "A", item(1));
        policy.on_insert(&mut storage, "B", item(2));
        (storage, policy)
    };

    let (mut first_storage, mut first_policy) = build();
    let (mut second_storage, mut second_policy) = build();
    assert_eq!(first_policy.evict(&mut first_storage).unwrap(), Some("A"));
    assert_eq!(second_policy.evict(&mut second_storage).unwrap(), Some("A"));

    // Unordered storage still yields whatever its scan produces first
    let mut storage = Store::new();
    let mut policy = LfuPolicy::new();
    for (key, value) in [("x", 1), ("y", 2), ("z", 3)] {
        policy.on_insert(&mut storage, key, item(value));
    }
    let first_scanned = *storage.entries().next().unwrap().0;
    assert_eq!(policy.evict(&mut storage).unwrap(), Some(first_scanned));
}

#[test]
fn test_lfu_ranks_unset_frequency_lowest() {
    let mut storage = Ordered::new();
    let mut policy = LfuPolicy::new();

    policy.on_insert(&mut storage, "tracked", item(1));
    storage.set("untracked", item(2));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("untracked"));
}

#[test]
fn test_on_expire_receives_decoded_value_once() {
    for mut policy in all_policies() {
        let seen: Arc<Mutex<Vec<(String, u32)>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let mut storage = Ordered::new();
        policy.on_insert(
            &mut storage,
            "a",
            item(7).with_on_expire(move |key, value| {
                sink.lock().unwrap().push((key.to_string(), value));
                Ok(())
            }),
        );

        assert_eq!(policy.evict(&mut storage).unwrap(), Some("a"));
        assert!(storage.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![("a".to_string(), 7)]);
    }
}

#[test]
fn test_callback_failure_still_deletes_victim() {
    for mut policy in all_policies() {
        let mut storage = Ordered::new();
        policy.on_insert(
            &mut storage,
            "a",
            item(1).with_on_expire(|_, _| Err("downstream unavailable".into())),
        );
        policy.on_insert(&mut storage, "b", item(2));
        policy.on_access(&mut storage, &"b");

        let err = policy.evict(&mut storage).unwrap_err();
        assert!(err.is_callback_failure());
        assert_eq!(err.recovery_hint(), &RecoveryHint::FixCallback);
        assert!(!storage.contains(&"a"), "{} kept a failed victim", policy.name());
        assert_eq!(storage.len(), 1);
    }
}

#[test]
fn test_malformed_value_reports_error_and_deletes() {
    let called = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&called);

    let mut storage = Store::new();
    let mut policy = LfuPolicy::new();
    policy.on_insert(
        &mut storage,
        "broken",
        CacheItem::new("{not json").with_on_expire(move |_, _: u32| {
            *flag.lock().unwrap() = true;
            Ok(())
        }),
    );

    let err = policy.evict(&mut storage).unwrap_err();
    match err {
        CacheError::Serialization { key, .. } => assert_eq!(key, "\"broken\""),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!*called.lock().unwrap());
    assert!(storage.is_empty());
}

#[test]
fn test_malformed_value_without_callback_is_not_decoded() {
    let mut storage: MemoryStorage<Key, u32> = Store::new();
    let mut policy = LfuPolicy::new();
    policy.on_insert(&mut storage, "broken", CacheItem::new("{not json"));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("broken"));
}

#[test]
fn test_lru_eviction() {
    let mut storage = Store::new();
    let mut policy = LruPolicy::<Key>::new();

    policy.on_insert(&mut storage, "a", item(1));
    policy.on_insert(&mut storage, "b", item(2));
    policy.on_insert(&mut storage, "c", item(3));

    // Access 'a' to make it more recent
    policy.on_access(&mut storage, &"a");

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("b"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("c"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("a"));
}

#[test]
fn test_lru_reinsert_marks_most_recent_and_clears_frequency() {
    let mut storage = Store::new();
    let mut policy = LruPolicy::<Key>::new();

    policy.on_insert(&mut storage, "a", item(1).with_frequency(9));
    policy.on_insert(&mut storage, "b", item(2));
    policy.on_insert(&mut storage, "a", item(3));

    assert_eq!(frequency(&storage, "a"), None);
    assert_eq!(policy.tracked(), 2);
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("b"));
}

#[test]
fn test_lru_remove_forgets_key() {
    let mut storage = Store::new();
    let mut policy = LruPolicy::<Key>::new();

    policy.on_insert(&mut storage, "a", item(1));
    policy.on_insert(&mut storage, "b", item(2));
    policy.on_remove(&mut storage, &"a");

    assert_eq!(policy.tracked(), 1);
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("b"));
    assert_eq!(policy.evict(&mut storage).unwrap(), None);
}

#[test]
fn test_ordered_policies_fall_back_to_scan_for_untracked_entries() {
    let mut lru = LruPolicy::<Key>::new();
    let mut storage = Ordered::new();
    storage.set("external", item(1));
    assert_eq!(
        EvictionPolicy::<Key, u32>::evict(&mut lru, &mut storage).unwrap(),
        Some("external")
    );

    let mut fifo = FifoPolicy::<Key>::new();
    storage.set("external", item(1));
    // Tracked key deleted behind the policy's back is skipped
    fifo.on_insert(&mut storage, "gone", item(2));
    storage.delete(&"gone");
    assert_eq!(fifo.evict(&mut storage).unwrap(), Some("external"));
    assert!(storage.is_empty());
}

#[test]
fn test_fifo_ignores_access() {
    let mut storage = Store::new();
    let mut policy = FifoPolicy::<Key>::new();

    policy.on_insert(&mut storage, "a", item(1));
    policy.on_insert(&mut storage, "b", item(2));
    policy.on_insert(&mut storage, "c", item(3));

    policy.on_access(&mut storage, &"a");
    policy.on_access(&mut storage, &"a");
    assert_eq!(frequency(&storage, "a"), None);

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("a"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("b"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("c"));
}

#[test]
fn test_fifo_reinsert_moves_to_back() {
    let mut storage = Store::new();
    let mut policy = FifoPolicy::<Key>::new();

    policy.on_insert(&mut storage, "a", item(1));
    policy.on_insert(&mut storage, "b", item(2));
    policy.on_insert(&mut storage, "a", item(3));

    assert_eq!(policy.evict(&mut storage).unwrap(), Some("b"));
    assert_eq!(policy.evict(&mut storage).unwrap(), Some("a"));
}

#[test]
fn test_clear_drops_tracking_state() {
    let mut storage = Store::new();
    let mut policy = LruPolicy::<Key>::new();
    policy.on_insert(&mut storage, "a", item(1));

    EvictionPolicy::<Key, u32>::clear(&mut policy);
    storage.clear();
    assert_eq!(policy.tracked(), 0);
    assert_eq!(policy.evict(&mut storage).unwrap(), None);
}

#[test]
fn test_strategy_parsing() {
    assert_eq!("lfu".parse::<EvictionStrategy>().unwrap(), EvictionStrategy::Lfu);
    assert_eq!("LRU".parse::<EvictionStrategy>().unwrap(), EvictionStrategy::Lru);
    assert_eq!(" Fifo ".parse::<EvictionStrategy>().unwrap(), EvictionStrategy::Fifo);
    assert_eq!(EvictionStrategy::default(), EvictionStrategy::Lfu);

    let err = "arc".parse::<EvictionStrategy>().unwrap_err();
    assert!(matches!(
        err.recovery_hint(),
        RecoveryHint::UseDefault { value } if value == "lfu"
    ));
}

#[test]
fn test_factory_builds_requested_policy() {
    for strategy in [
        EvictionStrategy::Lfu,
        EvictionStrategy::Lru,
        EvictionStrategy::Fifo,
    ] {
        let policy: Box<dyn EvictionPolicy<Key, u32>> =
            create_eviction_policy(strategy, JsonSerializer);
        assert_eq!(policy.name(), strategy.to_string());
    }
}

proptest! {
    #[test]
    fn test_lfu_frequency_counts_accesses(accesses in 0usize..64) {
        let mut storage = Store::new();
        let mut policy = LfuPolicy::new();
        policy.on_insert(&mut storage, "k", item(0));
        for _ in 0..accesses {
            policy.on_access(&mut storage, &"k");
        }
        prop_assert_eq!(frequency(&storage, "k"), Some(accesses as u64 + 1));
    }

    #[test]
    fn test_lfu_victim_is_minimal(
        entries in prop::collection::vec((0usize..6, -3i64..3), 1..24)
    ) {
        const KEYS: [&str; 24] = [
            "k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9", "k10", "k11",
            "k12", "k13", "k14", "k15", "k16", "k17", "k18", "k19", "k20", "k21", "k22", "k23",
        ];

        let mut storage = Store::new();
        let mut policy = LfuPolicy::new();
        for (index, (accesses, priority)) in entries.iter().enumerate() {
            let key = KEYS[index];
            policy.on_insert(&mut storage, key, item(index as u32).with_priority(*priority));
            for _ in 0..*accesses {
                policy.on_access(&mut storage, &key);
            }
        }

        let ranks: Vec<(Key, u64, i64)> = storage
            .entries()
            .map(|(k, entry)| (*k, entry.frequency_or_default(), entry.priority_or_default()))
            .collect();

        let victim = policy.evict(&mut storage).unwrap().unwrap();
        let (_, victim_frequency, victim_priority) =
            *ranks.iter().find(|(k, _, _)| *k == victim).unwrap();

        prop_assert_eq!(storage.len(), entries.len() - 1);
        for (_, other_frequency, other_priority) in &ranks {
            prop_assert!(victim_frequency <= *other_frequency);
            if victim_frequency == *other_frequency {
                prop_assert!(victim_priority <= *other_priority);
            }
        }
    }
}
