use mbridge_attributes::{
    AttributeSetEvent, Node, any_attribute_filter, attribute_event_id, attribute_filter,
};
use mbridge_dispatch::{DispatchRegistry, ListenerResult, TypeTag};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn write_is_visible_before_notification() {
    let registry = DispatchRegistry::new();
    let node = Rc::new(Node::new(registry.clone()));
    let observed = Rc::new(RefCell::new(Vec::new()));

    let (reader, sink) = (Rc::clone(&node), Rc::clone(&observed));
    registry.listen(attribute_filter("alpha.core/Health"), move |event: &mut AttributeSetEvent| {
        assert_eq!(event.node, reader.id());
        sink.borrow_mut().push(reader.get_attribute::<u32>(&event.key));
    });

    node.set_attribute("alpha.core/Health", 80_u32);
    node.set_attribute("alpha.core/Health", 55_u32);
    node.set_attribute("alpha.core/Mana", 10_u32);

    assert_eq!(*observed.borrow(), [Some(80), Some(55)]);
}

#[test]
fn wildcard_filter_sees_every_key_with_its_type() {
    let registry = DispatchRegistry::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    registry.listen(any_attribute_filter(), move |event: &mut AttributeSetEvent| {
        sink.borrow_mut().push((event.key.clone(), event.value_type));
    });

    let node = Node::new(registry);
    node.set_attribute("alpha.core/Name", String::from("orc"));
    let result = node.set_attribute("beta.ui/Visible", true);

    assert_eq!(result.invoked(), 1);
    assert_eq!(
        *seen.borrow(),
        [
            ("alpha.core/Name".to_owned(), TypeTag::of::<String>()),
            ("beta.ui/Visible".to_owned(), TypeTag::of::<bool>()),
        ]
    );
}

#[test]
fn listener_may_write_back_to_the_node() {
    let registry = DispatchRegistry::new();
    let node = Rc::new(Node::new(registry.clone()));

    let writer = Rc::clone(&node);
    registry.register(attribute_filter("alpha.core/Level"), move |event: &mut AttributeSetEvent| {
        let level = writer.get_attribute::<u8>(&event.key).unwrap_or_default();
        writer.set_attribute("beta.ui/Badge", format!("lvl {level}"));
        ListenerResult::Continue
    });

    node.set_attribute("alpha.core/Level", 3_u8);
    assert_eq!(node.get_attribute::<String>("beta.ui/Badge").as_deref(), Some("lvl 3"));
}

#[test]
fn posting_between_reads_lets_listeners_write_back() {
    let registry = DispatchRegistry::new();
    let node = Rc::new(Node::new(registry.clone()));
    node.set_attribute("alpha.core/Score", 7_i32);

    let writer = Rc::clone(&node);
    registry.listen("beta.ui/Refresh", move |_: &mut ()| {
        writer.set_attribute("beta.ui/Seen", true);
    });

    for key in node.attribute_keys() {
        let score = node.get_attribute::<i32>(&key);
        assert_eq!(score, Some(7));
        assert!(registry.post("beta.ui/Refresh", ()).was_handled());
    }

    assert_eq!(node.get_attribute::<bool>("beta.ui/Seen"), Some(true));
    let mut keys = node.attribute_keys();
    keys.sort_unstable();
    assert_eq!(keys, ["alpha.core/Score", "beta.ui/Seen"]);
}

#[test]
fn nodes_do_not_share_attributes() {
    let registry = DispatchRegistry::new();
    let (a, b) = (Node::new(registry.clone()), Node::new(registry));
    assert_ne!(a.id(), b.id());

    a.set_attribute("alpha.core/Tag", 'a');
    assert!(a.has_attribute("alpha.core/Tag"));
    assert!(!b.has_attribute("alpha.core/Tag"));
    assert_eq!(a.attribute_type("alpha.core/Tag"), Some("char"));
    assert!(a.remove_attribute("alpha.core/Tag"));
    assert_eq!(a.attribute_count(), 0);
}

#[test]
fn event_ids_are_prefixed() {
    assert_eq!(attribute_event_id("alpha.core/Score"), "attribute-set/alpha.core/Score");
    assert!(any_attribute_filter().matches("attribute-set/x"));
    assert!(!attribute_filter("a/b").matches("attribute-set/a/c"));
}
