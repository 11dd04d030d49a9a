use std::sync::{Arc, Mutex};

use mockall::predicate::eq;
use tally::counter_store;
use tally::CounterAction::{Decrement, Increment};

#[mockall::automock]
trait ChangeListener {
    fn on_change(&self, count: i64);
}

#[test]
fn given_two_subscribers_should_notify_in_subscription_order() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let first = seen.clone();
    store.subscribe(move |state| first.lock().unwrap().push(("first", state.count)));
    let second = seen.clone();
    store.subscribe(move |state| second.lock().unwrap().push(("second", state.count)));

    store.dispatch(Increment);

    assert_eq!(*seen.lock().unwrap(), vec![("first", 1), ("second", 1)]);
}

#[test]
fn given_a_notification_should_carry_the_already_applied_state() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let reader = store.clone();
    let log = seen.clone();
    store.subscribe(move |state| {
        // The snapshot passed in and a fresh read must agree.
        log.lock().unwrap().push((state.count, reader.state().count));
    });

    store.dispatch(Increment);

    assert_eq!(*seen.lock().unwrap(), vec![(1, 1)]);
}

#[test]
fn given_an_unsubscribed_listener_should_not_notify_it() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    let id = store.subscribe(move |state| log.lock().unwrap().push(state.count));

    store.dispatch(Increment);
    store.unsubscribe(id);
    store.dispatch(Increment);

    assert_eq!(*seen.lock().unwrap(), vec![1]);
}

#[test]
fn given_a_subscriber_that_dispatches_should_apply_the_action_after_the_pass() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let chain = store.clone();
    let log = seen.clone();
    store.subscribe(move |state| {
        log.lock().unwrap().push(state.count);
        if state.count == 1 {
            chain.dispatch(Decrement);
        }
    });

    store.dispatch(Increment);

    // The nested decrement lands after the increment's notification pass,
    // still inside the outer dispatch call.
    assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
    assert_eq!(store.state().count, 0);
}

#[test]
fn given_an_unsubscribe_during_notification_should_take_effect_from_the_next_dispatch() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let target = Arc::new(Mutex::new(None));

    let remover = store.clone();
    let target_id = target.clone();
    store.subscribe(move |_| {
        if let Some(id) = *target_id.lock().unwrap() {
            remover.unsubscribe(id);
        }
    });
    let log = seen.clone();
    let id = store.subscribe(move |state| log.lock().unwrap().push(state.count));
    *target.lock().unwrap() = Some(id);

    store.dispatch(Increment);
    store.dispatch(Increment);

    // The first pass still reaches the listener; the second does not.
    assert_eq!(*seen.lock().unwrap(), vec![1]);
}

#[test]
fn given_a_subscribe_during_notification_should_take_effect_from_the_next_dispatch() {
    let store = counter_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let added = Arc::new(Mutex::new(false));

    let adder = store.clone();
    let log = seen.clone();
    store.subscribe(move |_| {
        let mut added = added.lock().unwrap();
        if !*added {
            *added = true;
            let log = log.clone();
            adder.subscribe(move |state| log.lock().unwrap().push(state.count));
        }
    });

    store.dispatch(Increment);
    store.dispatch(Increment);

    // The listener added during the first pass misses it and sees only the
    // second mutation.
    assert_eq!(*seen.lock().unwrap(), vec![2]);
}

#[test]
fn given_a_mock_listener_should_observe_each_mutation_in_order() {
    let mut listener = MockChangeListener::new();
    let mut sequence = mockall::Sequence::new();
    listener
        .expect_on_change()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(());
    listener
        .expect_on_change()
        .with(eq(2))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(());
    listener
        .expect_on_change()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(());
    let listener = Mutex::new(listener);

    let store = counter_store();
    store.subscribe(move |state| listener.lock().unwrap().on_change(state.count));

    store.dispatch(Increment);
    store.dispatch(Increment);
    store.dispatch(Decrement);
}
