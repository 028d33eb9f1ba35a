//! Drag gesture recogniser.
//!
//! Turns a pointer down/move/up stream into drag samples whose translation is
//! cumulative from the press point. A press becomes a drag once it leaves the
//! touch slop; presses released inside the slop produce no drag events.

use smallvec::SmallVec;
use swipedeck_ui_graphics::Point;

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// The pointer left the touch slop.
    Start { position: Point },
    /// Cumulative translation since the press.
    Update { translation: Point },
    /// Pointer released after dragging.
    End { translation: Point, velocity: Point },
    /// Platform cancelled the gesture while dragging.
    Cancel { translation: Point },
}

pub type DragEvents = SmallVec<[DragEvent; 2]>;

#[derive(Clone, Debug)]
pub struct DragGesture {
    touch_slop: f32,
    max_velocity: f32,
    pointer: Option<PointerId>,
    press_position: Point,
    translation: Point,
    dragging: bool,
    tracker: VelocityTracker,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            max_velocity: MAX_FLING_VELOCITY,
            pointer: None,
            press_position: Point::ZERO,
            translation: Point::ZERO,
            dragging: false,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Feed one pointer event; returns the drag events it produced.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> DragEvents {
        let mut events = DragEvents::new();
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() {
                    // Second finger while tracking; stay with the first.
                    return events;
                }
                self.pointer = Some(event.id);
                self.press_position = event.position;
                self.translation = Point::ZERO;
                self.dragging = false;
                self.tracker.reset();
                self.tracker.add_position(event.time_ms, event.position);
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                self.tracker.add_position(event.time_ms, event.position);
                self.translation = event.position - self.press_position;
                if !self.dragging && self.translation.distance() > self.touch_slop {
                    self.dragging = true;
                    log::trace!("drag started at {:?}", self.press_position);
                    events.push(DragEvent::Start {
                        position: self.press_position,
                    });
                }
                if self.dragging {
                    event.consume();
                    events.push(DragEvent::Update {
                        translation: self.translation,
                    });
                }
            }
            PointerEventKind::Up => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                self.tracker.add_position(event.time_ms, event.position);
                self.translation = event.position - self.press_position;
                if self.dragging {
                    event.consume();
                    let velocity = self.tracker.calculate_velocity_with_max(self.max_velocity);
                    events.push(DragEvent::End {
                        translation: self.translation,
                        velocity,
                    });
                }
                self.reset();
            }
            PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                if self.dragging {
                    events.push(DragEvent::Cancel {
                        translation: self.translation,
                    });
                }
                self.reset();
            }
        }
        events
    }

    pub fn reset(&mut self) {
        self.pointer = None;
        self.dragging = false;
        self.translation = Point::ZERO;
        self.tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: PointerEventKind, x: f32, y: f32, time_ms: i64) -> PointerEvent {
        PointerEvent::new(kind, Point::new(x, y), time_ms)
    }

    #[test]
    fn press_inside_slop_produces_nothing() {
        let mut drag = DragGesture::new();
        assert!(drag
            .on_pointer_event(&event(PointerEventKind::Down, 100.0, 100.0, 0))
            .is_empty());
        assert!(drag
            .on_pointer_event(&event(PointerEventKind::Move, 103.0, 101.0, 10))
            .is_empty());
        let up = event(PointerEventKind::Up, 104.0, 101.0, 20);
        assert!(drag.on_pointer_event(&up).is_empty());
        assert!(!up.is_consumed());
        assert!(!drag.is_tracking());
    }

    #[test]
    fn leaving_slop_starts_and_updates_from_press_point() {
        let mut drag = DragGesture::new();
        drag.on_pointer_event(&event(PointerEventKind::Down, 100.0, 100.0, 0));
        let moved = event(PointerEventKind::Move, 130.0, 95.0, 16);
        let events = drag.on_pointer_event(&moved);
        assert_eq!(
            events.as_slice(),
            &[
                DragEvent::Start {
                    position: Point::new(100.0, 100.0)
                },
                DragEvent::Update {
                    translation: Point::new(30.0, -5.0)
                },
            ]
        );
        assert!(moved.is_consumed());
        assert!(drag.is_dragging());
    }

    #[test]
    fn release_reports_translation_and_velocity() {
        let mut drag = DragGesture::new();
        drag.on_pointer_event(&event(PointerEventKind::Down, 0.0, 0.0, 0));
        for step in 1..=5 {
            let x = step as f32 * 20.0;
            drag.on_pointer_event(&event(PointerEventKind::Move, x, 0.0, step * 10));
        }
        let events = drag.on_pointer_event(&event(PointerEventKind::Up, 120.0, 0.0, 60));
        match events.as_slice() {
            [DragEvent::End {
                translation,
                velocity,
            }] => {
                assert_eq!(*translation, Point::new(120.0, 0.0));
                assert!(velocity.x > 1_000.0, "velocity was {:?}", velocity);
                assert_eq!(velocity.y, 0.0);
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert!(!drag.is_tracking());
    }

    #[test]
    fn release_velocity_is_capped() {
        let mut drag = DragGesture::new().with_max_velocity(2_000.0);
        drag.on_pointer_event(&event(PointerEventKind::Down, 0.0, 0.0, 0));
        drag.on_pointer_event(&event(PointerEventKind::Move, 200.0, 0.0, 5));
        let events = drag.on_pointer_event(&event(PointerEventKind::Up, 400.0, 0.0, 10));
        assert!(matches!(
            events.as_slice(),
            [DragEvent::End { velocity, .. }] if velocity.x == 2_000.0
        ));
    }

    #[test]
    fn cancel_while_dragging_reports_cancel() {
        let mut drag = DragGesture::new();
        drag.on_pointer_event(&event(PointerEventKind::Down, 0.0, 0.0, 0));
        drag.on_pointer_event(&event(PointerEventKind::Move, 0.0, -50.0, 16));
        let events = drag.on_pointer_event(&event(PointerEventKind::Cancel, 0.0, -50.0, 32));
        assert_eq!(
            events.as_slice(),
            &[DragEvent::Cancel {
                translation: Point::new(0.0, -50.0)
            }]
        );
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut drag = DragGesture::new();
        drag.on_pointer_event(&event(PointerEventKind::Down, 0.0, 0.0, 0));
        let second = event(PointerEventKind::Down, 50.0, 50.0, 5).with_id(7);
        assert!(drag.on_pointer_event(&second).is_empty());
        let stray = event(PointerEventKind::Move, 300.0, 0.0, 10).with_id(7);
        assert!(drag.on_pointer_event(&stray).is_empty());
        assert!(!drag.is_dragging());
    }
}
