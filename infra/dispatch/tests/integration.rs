use mbridge_dispatch::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

fn recorder(log: &Log, name: &'static str, result: ListenerResult) -> impl Fn(&mut u32) -> ListenerResult + 'static {
    let log = Rc::clone(log);
    move |_: &mut u32| {
        log.borrow_mut().push(name);
        result
    }
}

#[test]
fn listeners_run_once_in_registration_order() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();

    registry.register("alpha.core/Tick", recorder(&log, "first", ListenerResult::Continue));
    registry.register("alpha.core/Tick", recorder(&log, "second", ListenerResult::Continue));
    registry.register("alpha.core/Tick", recorder(&log, "third", ListenerResult::Continue));

    let result = registry.post("alpha.core/Tick", 0_u32);

    assert!(!result.is_stopped());
    assert_eq!(result.invoked(), 3);
    assert_eq!(*log.borrow(), ["first", "second", "third"]);
}

#[test]
fn stop_halts_only_the_current_post() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();

    registry.register("alpha.core/Tick", recorder(&log, "first", ListenerResult::Stop));
    registry.register("alpha.core/Tick", recorder(&log, "second", ListenerResult::Continue));

    let result = registry.post("alpha.core/Tick", 0_u32);
    assert!(result.is_stopped());
    assert_eq!(result.invoked(), 1);

    registry.post("alpha.core/Tick", 0_u32);
    assert_eq!(*log.borrow(), ["first", "first"], "stop must apply again on the next post");
}

#[test]
fn unregistering_self_during_post_keeps_others_and_stops_future_delivery() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();
    let own_handle: Rc<Cell<Option<ListenerHandle>>> = Rc::default();

    registry.register("alpha.core/Tick", recorder(&log, "before", ListenerResult::Continue));
    let handle = {
        let registry_ref = registry.clone();
        let log = Rc::clone(&log);
        let own_handle = Rc::clone(&own_handle);
        registry.register("alpha.core/Tick", move |_: &mut u32| {
            log.borrow_mut().push("once");
            if let Some(handle) = own_handle.get() {
                assert!(registry_ref.unregister(handle));
            }
            ListenerResult::Continue
        })
    };
    own_handle.set(Some(handle));
    registry.register("alpha.core/Tick", recorder(&log, "after", ListenerResult::Continue));

    let first = registry.post("alpha.core/Tick", 0_u32);
    let second = registry.post("alpha.core/Tick", 0_u32);

    assert_eq!(first.invoked(), 3);
    assert_eq!(second.invoked(), 2);
    assert_eq!(*log.borrow(), ["before", "once", "after", "before", "after"]);
    assert!(!registry.is_registered(handle));
}

#[test]
fn listener_removed_by_an_earlier_listener_is_skipped() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();
    let victim: Rc<Cell<Option<ListenerHandle>>> = Rc::default();

    {
        let registry_ref = registry.clone();
        let victim = Rc::clone(&victim);
        registry.listen("alpha.core/Tick", move |_: &mut u32| {
            if let Some(handle) = victim.get() {
                registry_ref.unregister(handle);
            }
        });
    }
    victim.set(Some(registry.register("alpha.core/Tick", recorder(&log, "victim", ListenerResult::Continue))));
    registry.register("alpha.core/Tick", recorder(&log, "bystander", ListenerResult::Continue));

    registry.post("alpha.core/Tick", 0_u32);
    assert_eq!(*log.borrow(), ["bystander"]);
}

#[test]
fn listeners_added_during_post_wait_for_the_next_post() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();

    {
        let registry_ref = registry.clone();
        let log = Rc::clone(&log);
        let added = Cell::new(false);
        registry.listen("alpha.core/Tick", move |_: &mut u32| {
            if !added.replace(true) {
                registry_ref.register("alpha.core/Tick", recorder(&log, "late", ListenerResult::Continue));
            }
        });
    }

    assert_eq!(registry.post("alpha.core/Tick", 0_u32).invoked(), 1);
    assert!(log.borrow().is_empty());
    assert_eq!(registry.post("alpha.core/Tick", 0_u32).invoked(), 2);
    assert_eq!(*log.borrow(), ["late"]);
}

#[test]
fn reentrant_posts_are_supported() {
    let registry = DispatchRegistry::new();

    {
        let registry_ref = registry.clone();
        registry.listen("alpha.core/Countdown", move |n: &mut u32| {
            if *n > 0 {
                let mut next = *n - 1;
                registry_ref.post_mut("alpha.core/Countdown", &mut next);
                *n = next + 1;
            }
        });
    }

    let mut value = 5_u32;
    let result = registry.post_mut("alpha.core/Countdown", &mut value);
    assert_eq!(result.invoked(), 1);
    assert_eq!(value, 5);
}

#[test]
fn type_mismatch_is_a_silent_miss() {
    let registry = DispatchRegistry::new();
    let hits = Rc::new(Cell::new(0));

    {
        let hits = Rc::clone(&hits);
        registry.listen("alpha.core/Score", move |_: &mut (String, i32)| hits.set(hits.get() + 1));
    }
    {
        let hits = Rc::clone(&hits);
        // Conflicting signature on the same id: accepted, but only sees i64 posts.
        registry.listen("alpha.core/Score", move |_: &mut i64| hits.set(hits.get() + 10));
    }

    let wrong = registry.post("alpha.core/Score", ("player".to_owned(), 3_i64));
    assert!(!wrong.was_handled());

    let right = registry.post("alpha.core/Score", ("player".to_owned(), 3_i32));
    assert_eq!(right.invoked(), 1);

    registry.post("alpha.core/Score", 7_i64);
    assert_eq!(hits.get(), 11);
}

#[test]
fn posting_without_listeners_is_harmless() {
    let registry = DispatchRegistry::new();
    let result = registry.post("missing.mod/Anything", vec![1, 2, 3]);
    assert!(!result.was_handled());
    assert!(!result.is_stopped());
}

#[test]
fn prefix_and_wildcard_filters_match_namespaces() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();

    registry.register(EventFilter::parse("alpha.core/*").unwrap(), recorder(&log, "ns", ListenerResult::Continue));
    registry.register(EventFilter::parse("*").unwrap(), recorder(&log, "all", ListenerResult::Continue));

    registry.post("alpha.core/Tick", 0_u32);
    registry.post("beta.ui/Tick", 0_u32);

    assert_eq!(*log.borrow(), ["ns", "all", "all"]);
}

#[test]
fn owner_teardown_removes_only_that_owner() {
    let registry = DispatchRegistry::new();
    let log: Log = Rc::default();

    registry.register_owned("alpha.core", "x/Tick", recorder(&log, "alpha-1", ListenerResult::Continue));
    registry.register_owned("beta.ui", "x/Tick", recorder(&log, "beta", ListenerResult::Continue));
    registry.register_owned("alpha.core", "x/Other", recorder(&log, "alpha-2", ListenerResult::Continue));

    assert_eq!(registry.owned_count("alpha.core"), 2);
    assert_eq!(registry.unregister_owner("alpha.core"), 2);
    assert_eq!(registry.unregister_owner("alpha.core"), 0);

    registry.post("x/Tick", 0_u32);
    registry.post("x/Other", 0_u32);
    assert_eq!(*log.borrow(), ["beta"]);
}

#[test]
fn dispatch_event_carries_results_back() {
    let registry = DispatchRegistry::new();
    registry.register("alpha.core/Sum", |(values, total): &mut (Vec<i32>, i32)| {
        *total = values.iter().sum();
        ListenerResult::Stop
    });

    let mut event = DispatchEvent::new("alpha.core/Sum", (vec![1, 2, 3], 0));
    let result = event.post(&registry);

    assert!(result.is_stopped());
    assert_eq!(event.id(), "alpha.core/Sum");
    assert_eq!(event.into_payload().1, 6);
}

#[test]
fn payload_type_follows_remaining_listeners() {
    let registry = DispatchRegistry::new();
    registry.register_owned("alpha.core", "alpha.core/Add", |_: &mut (i32, i32)| {
        ListenerResult::Continue
    });
    assert_eq!(registry.payload_type("alpha.core/Add"), Some(TypeTag::of::<(i32, i32)>()));

    assert_eq!(registry.unregister_owner("alpha.core"), 1);
    assert_eq!(registry.payload_type("alpha.core/Add"), None);

    let seen = Rc::new(Cell::new(0));
    let counter = Rc::clone(&seen);
    let first = registry.listen("alpha.core/Add", move |_: &mut String| counter.set(counter.get() + 1));
    registry.listen("alpha.core/Add", |_: &mut u8| {});
    assert_eq!(registry.payload_type("alpha.core/Add"), Some(TypeTag::of::<String>()));

    assert_eq!(registry.post("alpha.core/Add", String::from("x")).invoked(), 1);
    assert_eq!(seen.get(), 1);

    assert!(registry.unregister(first));
    assert_eq!(registry.payload_type("alpha.core/Add"), Some(TypeTag::of::<u8>()));
}
