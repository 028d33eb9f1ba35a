use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swipedeck_core::Runtime;
use swipedeck_ui::{decide, Card, CardStack, StackConfig, SwipeDirection, SwipeThresholds};
use swipedeck_ui_graphics::{Point, Size};

const FRAME_NANOS: u64 = 16_666_667;
const STACK_SIZE_SAMPLES: &[usize] = &[1, 3, 8];
const DECK_LEN: usize = 64;
const VIEWPORT: Size = Size {
    width: 1080.0,
    height: 1920.0,
};

struct BenchCard(usize);

impl Card for BenchCard {
    type Id = usize;

    fn id(&self) -> usize {
        self.0
    }
}

struct StackFixture {
    runtime: Runtime,
    stack: CardStack<BenchCard>,
    frame_time: u64,
}

impl StackFixture {
    fn new(stack_size: usize) -> Self {
        let runtime = Runtime::new();
        let stack = CardStack::new(runtime.handle(), VIEWPORT)
            .with_stack_config(StackConfig::default().with_stack_size(stack_size))
            .with_cards((0..DECK_LEN).map(BenchCard).collect::<Vec<_>>());
        Self {
            runtime,
            stack,
            frame_time: 0,
        }
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            self.frame_time += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.frame_time);
            frames += 1;
        }
        frames
    }
}

fn bench_decide(c: &mut Criterion) {
    let thresholds = SwipeThresholds::new(0.3 * VIEWPORT.width, 500.0);
    let samples: Vec<(Point, Point)> = (0..256)
        .map(|i| {
            let t = i as f32 / 255.0;
            (
                Point::new((t - 0.5) * 800.0, -t * 600.0),
                Point::new((0.5 - t) * 1_200.0, -t * 900.0),
            )
        })
        .collect();

    c.bench_function("swipe_decide", |b| {
        b.iter(|| {
            for &(translation, velocity) in &samples {
                black_box(decide(translation, velocity, thresholds));
            }
        });
    });
}

fn bench_layers_while_dragging(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_layers_dragging");
    for &stack_size in STACK_SIZE_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("stack_size", stack_size),
            &stack_size,
            |b, &stack_size| {
                let fixture = StackFixture::new(stack_size);
                fixture.stack.on_drag_start();
                let mut x = 0.0f32;

                b.iter(|| {
                    x = (x + 7.0) % VIEWPORT.width;
                    fixture.stack.on_drag_update(Point::new(x - 300.0, -x * 0.2));
                    black_box(fixture.stack.layers());
                });
            },
        );
    }
    group.finish();
}

fn bench_commit_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_commit_frames");
    for &stack_size in STACK_SIZE_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("stack_size", stack_size),
            &stack_size,
            |b, &stack_size| {
                let mut fixture = StackFixture::new(stack_size);
                let mut direction = 0;

                b.iter(|| {
                    if fixture.stack.is_empty() {
                        fixture
                            .stack
                            .set_cards((0..DECK_LEN).map(BenchCard).collect::<Vec<_>>());
                    }
                    direction = (direction + 1) % SwipeDirection::ALL.len();
                    fixture.stack.handle().swipe(SwipeDirection::ALL[direction]);
                    black_box(fixture.settle());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    swipe_frames,
    bench_decide,
    bench_layers_while_dragging,
    bench_commit_animation
);
criterion_main!(swipe_frames);
