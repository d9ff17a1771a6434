use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use queue_sim::engine::simulate;
use queue_sim::models::{GaussianWorkload, PoolConfig};
use queue_sim::workload::gaussian_tasks;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TASKS: usize = 10_000;

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let workload = GaussianWorkload {
        tasks: TASKS,
        ..GaussianWorkload::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let tasks = gaussian_tasks(&workload, &mut rng).expect("valid workload");
    let pools = [
        PoolConfig {
            static_servers: 4,
            dynamic_servers: 0,
            has_queue: false,
        },
        PoolConfig {
            static_servers: 4,
            dynamic_servers: 0,
            has_queue: true,
        },
        PoolConfig {
            static_servers: 4,
            dynamic_servers: 2,
            has_queue: true,
        },
    ];

    for pool in pools {
        group.bench_with_input(
            BenchmarkId::new(pool.to_string(), TASKS),
            &pool,
            |b, pool: &PoolConfig| {
                b.iter_batched(
                    || (tasks.clone(), StdRng::seed_from_u64(7)),
                    |(mut tasks, mut rng)| {
                        let run = simulate(&mut tasks, *pool, &mut rng)
                            .expect("simulation should succeed");
                        black_box(run);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
