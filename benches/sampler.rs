use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use vosetables::{AliasTable, BuildOptions, PackedAliasTable, validate};

fn gen_weights(n: usize) -> Vec<f64> {
    let mut rng = Pcg32::seed_from_u64(777);
    (0..n).map(|_| 0.1 + rng.random::<f64>()).collect()
}

fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");
    for &n in &[2usize, 8, 64, 256, 1024] {
        let weights = gen_weights(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flat_n={n}"), |b| {
            b.iter(|| {
                let v = validate::<u32>(black_box(&weights)).unwrap();
                black_box(AliasTable::build(v, BuildOptions::default())).unwrap()
            });
        });
        group.bench_function(format!("packed_n={n}"), |b| {
            b.iter(|| {
                let v = validate::<u32>(black_box(&weights)).unwrap();
                black_box(PackedAliasTable::build(v, BuildOptions::default())).unwrap()
            });
        });
        group.bench_function(format!("flat_prescaled_in_place_n={n}"), |b| {
            b.iter_batched_ref(
                || {
                    let mut scaled = weights.clone();
                    let total: f64 = scaled.iter().sum();
                    for w in &mut scaled {
                        *w *= n as f64 / total;
                    }
                    scaled
                },
                |scaled| {
                    let v = vosetables::validate_mut::<u32>(scaled).unwrap();
                    let opts = BuildOptions {
                        can_mutate: true,
                        pre_scaled: true,
                        ..Default::default()
                    };
                    black_box(AliasTable::build(v, opts)).unwrap()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_table_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_sample");
    const DRAWS_PER_ITER: usize = 1024;

    for &n in &[2usize, 8, 64, 256, 1024] {
        let weights = gen_weights(n);
        let flat =
            AliasTable::<u32>::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();
        let packed =
            PackedAliasTable::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();
        group.throughput(Throughput::Elements((DRAWS_PER_ITER * n) as u64));

        group.bench_function(format!("flat_n={n}"), |b| {
            b.iter_batched_ref(
                || Pcg32::seed_from_u64(999),
                |rng| {
                    let mut s = 0usize;
                    for _ in 0..DRAWS_PER_ITER {
                        s ^= flat.sample_index(rng);
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("packed_n={n}"), |b| {
            b.iter_batched_ref(
                || Pcg32::seed_from_u64(999),
                |rng| {
                    let mut s = 0usize;
                    for _ in 0..DRAWS_PER_ITER {
                        s ^= packed.sample_index(rng);
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(sampler, bench_table_build, bench_table_sample);
criterion_main!(sampler);
