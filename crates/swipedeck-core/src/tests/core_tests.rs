use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn frame_callbacks_run_once_in_registration_order() {
    let runtime = Runtime::new();
    let clock = runtime.frame_clock();
    let order = Rc::new(RefCell::new(Vec::new()));

    let _first = {
        let order = Rc::clone(&order);
        clock.with_frame_nanos(move |time| order.borrow_mut().push(("first", time)))
    };
    let _second = {
        let order = Rc::clone(&order);
        clock.with_frame_nanos(move |time| order.borrow_mut().push(("second", time)))
    };

    runtime.drain_frame_callbacks(16);
    runtime.drain_frame_callbacks(32);

    assert_eq!(order.borrow().as_slice(), &[("first", 16), ("second", 16)]);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new();
    let fired = Rc::new(Cell::new(false));
    {
        let fired = Rc::clone(&fired);
        let registration = runtime
            .frame_clock()
            .with_frame_nanos(move |_| fired.set(true));
        assert!(registration.is_active());
        drop(registration);
    }
    runtime.drain_frame_callbacks(16);
    assert!(!fired.get());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let times = Rc::new(RefCell::new(Vec::new()));

    {
        let times = Rc::clone(&times);
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |time| {
            times.borrow_mut().push(time);
            let times = Rc::clone(&times);
            inner_handle.register_frame_callback(move |time| times.borrow_mut().push(time));
        });
    }

    runtime.drain_frame_callbacks(10);
    assert_eq!(times.borrow().as_slice(), &[10]);
    runtime.drain_frame_callbacks(20);
    assert_eq!(times.borrow().as_slice(), &[10, 20]);
    assert_eq!(handle.last_frame_time_nanos(), Some(20));
    assert_eq!(handle.frames_drained(), 2);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);
    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
}

#[test]
fn mutable_state_notifies_only_on_change() {
    let state = MutableState::new(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let seen = Rc::clone(&seen);
        state.subscribe(move |value| seen.borrow_mut().push(*value))
    };

    state.set_value(1);
    state.set_value(2);
    state.update(|value| *value += 1);
    state.update(|_| ());

    assert_eq!(seen.borrow().as_slice(), &[2, 3]);
    assert_eq!(state.as_state().get(), 3);
}

#[test]
fn dropped_subscription_stops_notifications() {
    let state = MutableState::new("idle");
    let count = Rc::new(Cell::new(0));
    let subscription = {
        let count = Rc::clone(&count);
        state.as_state().subscribe(move |_| count.set(count.get() + 1))
    };
    state.set_value("dragging");
    drop(subscription);
    state.set_value("idle");
    assert_eq!(count.get(), 1);
}

#[test]
fn listener_may_write_back_to_state() {
    let state = MutableState::new(0);
    let writer = state.clone();
    state
        .subscribe(move |value| {
            if *value == 1 {
                writer.set_value(2);
            }
        })
        .detach();
    state.set_value(1);
    assert_eq!(state.value(), 2);
}
