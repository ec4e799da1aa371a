// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use meridian_camera::MapCamera;
use meridian_event_state::pointer::PointerEvent;
use meridian_gestures::{
    Annotations, CameraCommand, GestureDispatcher, LatLng, Projection, Telemetry, TrackingPolicy,
    Transform, UiPolicy, UiSettings, ZoomControls,
};

struct BenchView {
    camera: MapCamera,
    settings: UiSettings,
}

impl BenchView {
    fn new() -> Self {
        let mut camera = MapCamera::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
        camera.set_zoom(16.0);
        Self {
            camera,
            settings: UiSettings::default(),
        }
    }
}

impl Transform for BenchView {
    fn apply(&mut self, command: CameraCommand) {
        self.camera.apply(command);
    }
    fn zoom(&self) -> f64 {
        self.camera.zoom()
    }
    fn bearing(&self) -> f64 {
        self.camera.bearing()
    }
    fn pitch(&self) -> f64 {
        self.camera.pitch()
    }
    fn view_center(&self) -> Point {
        self.camera.view_center()
    }
    fn set_gesture_in_progress(&mut self, in_progress: bool) {
        self.camera.set_gesture_in_progress(in_progress);
    }
}

impl TrackingPolicy for BenchView {
    fn is_pan_enabled(&self) -> bool {
        true
    }
    fn is_rotate_enabled(&self) -> bool {
        true
    }
    fn reset_tracking_modes(&mut self, _: bool, _: bool) {}
}

impl UiPolicy for BenchView {
    fn is_zoom_gestures_enabled(&self) -> bool {
        self.settings.zoom_gestures_enabled
    }
    fn is_tilt_gestures_enabled(&self) -> bool {
        self.settings.tilt_gestures_enabled
    }
    fn is_zoom_controls_enabled(&self) -> bool {
        self.settings.zoom_controls_enabled
    }
    fn deselect_markers_on_tap(&self) -> bool {
        self.settings.deselect_markers_on_tap
    }
}

impl Projection for BenchView {
    fn screen_to_model(&self, point: Point) -> LatLng {
        let world = self.camera.view_to_world_point(point);
        LatLng::new(-world.y, world.x)
    }
}

impl Annotations for BenchView {
    fn hit_test(&mut self, _: Point, _: f64) -> bool {
        false
    }
    fn clear_selection(&mut self) {}
}

impl Telemetry for BenchView {}
impl ZoomControls for BenchView {}

/// One-finger drag: down, `moves` frames 8 ms apart, release.
fn drag_stream(moves: u64) -> Vec<PointerEvent> {
    let start = Point::new(300.0, 360.0);
    let mut events = vec![PointerEvent::down(0, start)];
    let mut p = start;
    for i in 1..=moves {
        p += Vec2::new(4.0, 1.0);
        events.push(PointerEvent::moved(i * 8, 0, &[p]));
    }
    events.push(PointerEvent::up(moves * 8 + 8, 0, p));
    events
}

/// Two-finger gesture that pinches out while twisting and drifting upward.
fn two_finger_stream(moves: u64) -> Vec<PointerEvent> {
    let center = Point::new(640.0, 360.0);
    let pair = |half: f64, degrees: f64, dy: f64| {
        let arm = Vec2::from_angle(degrees.to_radians()) * half;
        let c = center + Vec2::new(0.0, dy);
        [c - arm, c + arm]
    };
    let first = pair(100.0, 0.0, 0.0);
    let mut events = vec![
        PointerEvent::down(0, first[0]),
        PointerEvent::pointer_down(4, 0, &first, 1),
    ];
    let mut last = first;
    for i in 1..=moves {
        let t = i as f64;
        last = pair(100.0 + 3.0 * t, 0.5 * t, -1.5 * t);
        events.push(PointerEvent::moved(4 + i * 8, 0, &last));
    }
    let end = 4 + moves * 8 + 8;
    events.push(PointerEvent::pointer_up(end, 0, &last, 1));
    events.push(PointerEvent::up(end + 8, 0, last[0]));
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for moves in [16_u64, 256] {
        let drag = drag_stream(moves);
        group.bench_function(format!("drag_and_fling(moves={moves})"), |b| {
            b.iter_batched(
                || (GestureDispatcher::default(), BenchView::new()),
                |(mut dispatcher, mut view)| {
                    for event in &drag {
                        black_box(dispatcher.handle_pointer_event(event, &mut view));
                    }
                    black_box(view.camera.transition());
                },
                BatchSize::SmallInput,
            );
        });

        let twist = two_finger_stream(moves);
        group.bench_function(format!("pinch_twist_shove(moves={moves})"), |b| {
            b.iter_batched(
                || (GestureDispatcher::default(), BenchView::new()),
                |(mut dispatcher, mut view)| {
                    for event in &twist {
                        black_box(dispatcher.handle_pointer_event(event, &mut view));
                    }
                    black_box(view.camera.zoom());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
