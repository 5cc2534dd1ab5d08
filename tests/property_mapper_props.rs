//! Property-based tests for the generic mapper and path utilities.

use proptest::prelude::*;
use serde_json::{json, Value};

use hub_domain::mapper::PropertyMapper;
use hub_domain::path::{deep_set, get_prop, set_prop};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,4}", 1..=3).prop_map(|segments| segments.join("."))
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[ -~]{0,12}".prop_map(Value::String),
        prop::collection::vec("[a-z]{1,6}", 0..4).prop_map(|items| json!(items)),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn store_value_reappears_on_entity(
        entity_key in path_strategy(),
        store_key in path_strategy(),
        value in leaf_strategy(),
    ) {
        let mapper = PropertyMapper::builder().map(&entity_key, &store_key).build();
        let mut store = json!({});
        set_prop(&mut store, &store_key, value.clone());

        let entity = mapper.store_to_entity(&store, &json!({}));
        prop_assert_eq!(get_prop(&entity, &entity_key), Some(&value));
    }

    #[test]
    fn null_source_keeps_seed(
        entity_key in path_strategy(),
        store_key in path_strategy(),
        seed_value in leaf_strategy(),
        store_is_null in any::<bool>(),
    ) {
        let mapper = PropertyMapper::builder().map(&entity_key, &store_key).build();
        let mut seed = json!({});
        set_prop(&mut seed, &entity_key, seed_value);
        let mut store = json!({});
        if store_is_null {
            set_prop(&mut store, &store_key, Value::Null);
        }

        let entity = mapper.store_to_entity(&store, &seed);
        prop_assert_eq!(entity, seed);
    }

    #[test]
    fn entity_value_reappears_on_store(
        entity_key in path_strategy(),
        store_key in path_strategy(),
        value in leaf_strategy(),
    ) {
        let mapper = PropertyMapper::builder().map(&entity_key, &store_key).build();
        let mut entity = json!({});
        set_prop(&mut entity, &entity_key, value.clone());

        let store = mapper.entity_to_store(&entity, &json!({"untouched": true}));
        prop_assert_eq!(get_prop(&store, &store_key), Some(&value));
        prop_assert_eq!(store.get("untouched"), Some(&json!(true)));
    }

    #[test]
    fn deep_set_object_merge_keeps_existing_keys(
        existing in prop::collection::btree_map("[a-m]{1,3}", any::<i32>(), 0..5),
        incoming in prop::collection::btree_map("[n-z]{1,3}", any::<i32>(), 0..5),
    ) {
        let mut target = json!({"cfg": existing.clone()});
        deep_set(&mut target, "cfg", json!(incoming.clone()));

        for (key, value) in existing.iter().chain(incoming.iter()) {
            prop_assert_eq!(&target["cfg"][key.as_str()], &json!(value));
        }
    }

    #[test]
    fn deep_set_never_merges_arrays(
        before in prop::collection::vec(any::<i32>(), 0..5),
        after in prop::collection::vec(any::<i32>(), 0..5),
    ) {
        let mut target = json!({"list": before});
        deep_set(&mut target, "list", json!(after.clone()));
        prop_assert_eq!(target, json!({"list": after}));
    }
}
