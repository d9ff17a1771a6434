use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_sim::engine::{simulate, StableRng};
use queue_sim::models::{GaussianWorkload, PoolConfig};
use queue_sim::workload::gaussian_tasks;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TASK_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let pool = PoolConfig {
        static_servers: 4,
        dynamic_servers: 1,
        has_queue: true,
    };

    for &count in TASK_COUNTS {
        let workload = GaussianWorkload {
            tasks: count,
            ..GaussianWorkload::default()
        };
        let mut tasks = gaussian_tasks(&workload, &mut StdRng::seed_from_u64(3))
            .expect("valid workload");
        let run = simulate(&mut tasks, pool, &mut StableRng).expect("simulation should succeed");

        group.bench_with_input(BenchmarkId::new("compute", count), &count, |b, _| {
            b.iter(|| {
                let stats = run.statistics(&tasks).expect("statistics should compute");
                black_box(stats);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_statistics);
criterion_main!(benches);
