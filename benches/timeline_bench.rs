use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use queue_sim::events::{Event, SimTime, Timeline};

const EVENT_COUNTS: &[usize] = &[128, 1_024, 8_192, 65_536];

fn bench_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline");

    for &count in EVENT_COUNTS {
        group.bench_with_input(BenchmarkId::new("scan_with_inserts", count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let mut timeline = Timeline::new();
                    for idx in 0..count {
                        timeline.schedule(SimTime::new(idx as f64), Event::Arrival(idx));
                    }
                    timeline
                },
                |mut timeline| {
                    let mut cursor = None;
                    while let Some((time, events)) = timeline.next_after(cursor) {
                        cursor = Some(time);
                        for event in events {
                            if let Event::Arrival(task_id) = event {
                                timeline.schedule(
                                    SimTime::new(time.as_f64() + 2.5),
                                    Event::Departure {
                                        task_id,
                                        server_id: task_id % 8,
                                    },
                                );
                            }
                        }
                    }
                    black_box(timeline);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_timeline);
criterion_main!(benches);
