use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipedeck_core::Runtime;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(runtime: &Runtime, frame_time: &mut u64, frames: usize) {
    for _ in 0..frames {
        if !runtime.has_frame_callbacks() {
            break;
        }
        *frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(*frame_time);
    }
}

#[test]
fn tween_interpolates_over_time_and_lands_on_target() {
    let runtime = Runtime::new();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let state = anim.state();
    let mut samples = vec![state.get()];

    anim.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(200)));
    assert!(anim.is_running());

    let mut frame_time = 0u64;
    for _ in 0..32 {
        if !runtime.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(frame_time);
        samples.push(state.get());
    }

    assert!(samples.iter().any(|value| *value > 0.0 && *value < 1.0));
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(anim.value(), 1.0);
    assert!(!anim.is_running());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn tween_delay_holds_start_value() {
    let runtime = Runtime::new();
    let anim = Animatable::new(10.0f32, runtime.handle());
    anim.animate_to(
        20.0,
        AnimationType::Tween(AnimationSpec::linear(100).with_delay(100)),
    );
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(50_000_000);
    assert_eq!(anim.value(), 10.0);
    runtime.drain_frame_callbacks(150_000_000);
    assert!((anim.value() - 15.0).abs() < 1e-3);
    runtime.drain_frame_callbacks(250_000_000);
    assert_eq!(anim.value(), 20.0);
}

#[test]
fn end_callback_fires_once_with_finished() {
    let runtime = Runtime::new();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let ends = Rc::new(RefCell::new(Vec::new()));
    {
        let ends = Rc::clone(&ends);
        anim.animate_to_then(
            -300.0,
            AnimationType::Tween(AnimationSpec::tween(300, Easing::EaseOut)),
            0.0,
            move |end| ends.borrow_mut().push(end),
        );
    }
    let mut frame_time = 0;
    pump(&runtime, &mut frame_time, 64);
    pump(&runtime, &mut frame_time, 8);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
    assert_eq!(anim.value(), -300.0);
}

#[test]
fn snap_interrupts_running_animation() {
    let runtime = Runtime::new();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let end = Rc::new(Cell::new(None));
    {
        let end = Rc::clone(&end);
        anim.animate_to_then(
            100.0,
            AnimationType::Tween(AnimationSpec::linear(1_000)),
            0.0,
            move |reason| end.set(Some(reason)),
        );
    }
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(100_000_000);
    anim.snap_to(0.0);

    assert_eq!(end.get(), Some(AnimationEnd::Interrupted));
    assert_eq!(anim.value(), 0.0);
    assert_eq!(anim.state().get(), 0.0);
    assert!(!anim.is_running());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn retargeting_interrupts_previous_callback() {
    let runtime = Runtime::new();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let reasons = Rc::new(RefCell::new(Vec::new()));
    for target in [50.0, 80.0] {
        let reasons = Rc::clone(&reasons);
        anim.animate_to_then(
            target,
            AnimationType::Tween(AnimationSpec::linear(100)),
            0.0,
            move |reason| reasons.borrow_mut().push((target, reason)),
        );
    }
    let mut frame_time = 0;
    pump(&runtime, &mut frame_time, 32);
    assert_eq!(
        reasons.borrow().as_slice(),
        &[
            (50.0, AnimationEnd::Interrupted),
            (80.0, AnimationEnd::Finished)
        ]
    );
}

#[test]
fn spring_settles_on_target() {
    let runtime = Runtime::new();
    let anim = Animatable::new(120.0f32, runtime.handle());
    let finished = Rc::new(Cell::new(false));
    {
        let finished = Rc::clone(&finished);
        anim.animate_to_then(
            0.0,
            AnimationType::Spring(SpringSpec::physical(15.0, 100.0, 1.0)),
            0.0,
            move |reason| finished.set(reason == AnimationEnd::Finished),
        );
    }
    let mut frame_time = 0;
    let mut min_seen = f32::MAX;
    for _ in 0..600 {
        if !runtime.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(frame_time);
        min_seen = min_seen.min(anim.value());
    }
    assert!(finished.get(), "spring should settle within ten seconds");
    assert_eq!(anim.value(), 0.0);
    // damping ratio 0.75 overshoots slightly past the target
    assert!(min_seen < 0.0);
}

#[test]
fn spring_carries_initial_velocity() {
    let runtime = Runtime::new();
    let anim = Animatable::new(0.0f32, runtime.handle());
    anim.animate_to_then(
        0.0,
        AnimationType::Spring(SpringSpec::physical(15.0, 100.0, 1.0)),
        1_000.0,
        |_| {},
    );
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert!(anim.value() > 0.0, "velocity should push past the target");
}

#[test]
fn physical_spring_converts_damping() {
    let spec = SpringSpec::physical(15.0, 100.0, 1.0);
    assert!((spec.damping_ratio - 0.75).abs() < 1e-6);
    assert!((spec.damping_coefficient() - 15.0).abs() < 1e-4);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinearIn,
    ];

    for easing in easings {
        let start = easing.transform(0.0);
        let end = easing.transform(1.0);
        assert!(start.abs() < 0.01, "Start should be ~0 for {:?}", easing);
        assert!((end - 1.0).abs() < 0.01, "End should be ~1 for {:?}", easing);
    }
}

#[test]
fn ease_out_decelerates() {
    let early = Easing::EaseOut.transform(0.25);
    let late = Easing::EaseOut.transform(1.0) - Easing::EaseOut.transform(0.75);
    assert!(early > 0.25);
    assert!(late < early);
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowIn);
    assert_eq!(spec.delay_millis, 0);
    assert_eq!(spec.with_delay(50).total_nanos(), 350_000_000);
}

#[test]
fn spring_spec_presets() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
}
