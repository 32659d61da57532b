use serde_json::{json, Value};
use shared::{domain::GroupKey, group_by, Fields, Selector};

// Small deterministic generator so every run checks the same inputs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn sample_records(seed: u64, len: usize) -> Vec<Value> {
    let mut rng = Lcg(seed);
    (0..len)
        .map(|id| match rng.next(4) {
            0 => json!({"id": id}),
            1 => json!({"id": id, "k": rng.next(3)}),
            2 => json!({"id": id, "k": format!("s{}", rng.next(3))}),
            _ => json!({"id": id, "k": null}),
        })
        .collect()
}

fn ids(records: &[Value]) -> Vec<u64> {
    records
        .iter()
        .map(|r| r["id"].as_u64().expect("id"))
        .collect()
}

#[test]
fn grouping_partitions_preserves_order_and_sorts_keys() {
    for seed in 0..50 {
        let records = sample_records(seed, (seed as usize) * 3);
        let grouped = group_by(records.clone(), Selector::field("k"));

        assert_eq!(grouped.record_count(), records.len(), "seed {seed}");

        let mut seen: Vec<u64> = grouped.iter().flat_map(|(_, group)| ids(group)).collect();
        seen.sort_unstable();
        assert_eq!(seen, ids(&records), "every record in exactly one group");

        for (key, group) in grouped.iter() {
            assert!(!group.is_empty());
            let group_ids = ids(group);
            assert!(group_ids.windows(2).all(|w| w[0] < w[1]), "stable order");
            assert!(group.iter().all(|r| &r.field("k") == key));
        }

        let keys: Vec<&GroupKey> = grouped.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "ascending distinct keys");
    }
}

#[test]
fn field_selector_matches_equivalent_key_function() {
    for seed in 0..20 {
        let records = sample_records(seed, 40);

        let by_field = group_by(records.clone(), Selector::field("k"));
        let by_fn = group_by(records, Selector::key(|r: &Value| r.field("k")));

        assert_eq!(by_field, by_fn, "seed {seed}");
    }
}

#[test]
fn empty_input_is_empty_for_any_selector() {
    let grouped = group_by(Vec::<Value>::new(), Selector::field("anything"));
    assert!(grouped.is_empty());

    let grouped = group_by(Vec::<Value>::new(), Selector::key(|_: &Value| GroupKey::Null));
    assert!(grouped.is_empty());
}
