use mbridge_attributes::AttributeStore;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[test]
fn later_set_with_other_type_fully_overwrites() {
    let mut store = AttributeStore::new();
    store.set("alpha.core/Pos", Position { x: 1.0, y: 2.0 });
    store.set("alpha.core/Pos", String::from("detached"));

    assert!(store.get::<Position>("alpha.core/Pos").is_none());
    assert_eq!(store.get::<String>("alpha.core/Pos").map(String::as_str), Some("detached"));
    assert_eq!(store.type_name("alpha.core/Pos"), Some(std::any::type_name::<String>()));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_mut_writes_in_place() {
    let mut store = AttributeStore::new();
    store.set("alpha.core/Pos", Position { x: 0.0, y: 0.0 });

    if let Some(pos) = store.get_mut::<Position>("alpha.core/Pos") {
        pos.x = 5.0;
    }
    assert_eq!(store.get::<Position>("alpha.core/Pos"), Some(&Position { x: 5.0, y: 0.0 }));
}

#[test]
fn keys_and_removal() {
    let mut store = AttributeStore::new();
    store.set("alpha.core/A", 1_u8);
    store.set("beta.ui/B", ());

    let mut keys: Vec<_> = store.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["alpha.core/A", "beta.ui/B"]);

    assert!(store.remove("alpha.core/A"));
    assert!(!store.remove("alpha.core/A"));
    assert!(!store.contains("alpha.core/A"));
    assert!(store.get::<()>("beta.ui/B").is_some());
}

proptest! {
    #[test]
    fn set_then_get_round_trips(key in "[a-z]{1,8}/[A-Za-z]{1,8}", value in any::<i64>(), text in ".*") {
        let mut store = AttributeStore::new();
        store.set(key.clone(), value);
        prop_assert_eq!(store.get::<i64>(&key), Some(&value));
        prop_assert!(store.get::<u64>(&key).is_none());

        store.set(key.clone(), text.clone());
        prop_assert_eq!(store.get::<String>(&key), Some(&text));
        prop_assert!(store.get::<i64>(&key).is_none());
    }
}
