use core::hint::black_box;
use std::collections::HashMap;
use std::hash::BuildHasher;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hash_pile::HashPile;
use hash_pile::InlinedList;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use siphasher::sip::SipHasher;

#[derive(Clone, Default)]
struct SipHashBuilder;

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

const SIZES: &[usize] = &[(1 << 10), (1 << 13), (1 << 16)];

/// Duplicate-heavy workload: each key appears around 8 times.
fn keys(size: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    (0..size).map(|_| rng.random_range(0..(size as u64 / 8).max(1))).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("hash_pile/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut pile: HashPile<u64, SipHashBuilder> = HashPile::new();
                    for key in keys {
                        pile.insert(key);
                    }
                    black_box(pile)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("counted_hash_map/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map: HashMap<u64, usize, SipHashBuilder> = HashMap::default();
                    for key in keys {
                        *map.entry(key).or_insert(0) += 1;
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_count_of");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = keys(size);
        let mut pile: HashPile<u64, SipHashBuilder> = HashPile::new();
        let mut map: HashMap<u64, usize, SipHashBuilder> = HashMap::default();
        for &key in &keys {
            pile.insert(key);
            *map.entry(key).or_insert(0) += 1;
        }
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("hash_pile/{size}"), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for key in &keys {
                    total += pile.count_of(black_box(key));
                }
                black_box(total)
            })
        });

        group.bench_function(format!("counted_hash_map/{size}"), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for key in &keys {
                    total += map.get(black_box(key)).copied().unwrap_or(0);
                }
                black_box(total)
            })
        });
    }

    group.finish();
}

fn bench_remove_insert_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_churn");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("hash_pile/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut pile: HashPile<u64, SipHashBuilder> = HashPile::new();
                    for &key in &keys {
                        pile.insert(key);
                    }
                    pile
                },
                |mut pile| {
                    // remove and re-add everything; exercises the free list
                    for key in &keys {
                        pile.remove(key);
                    }
                    for &key in &keys {
                        pile.insert(key);
                    }
                    black_box(pile)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_small_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_list_build");

    // the InlinedList sweet spot: huge numbers of tiny lists
    for &len in &[1usize, 2, 8] {
        group.throughput(Throughput::Elements(10_000));

        group.bench_function(format!("inlined_list/{len}"), |b| {
            b.iter(|| {
                let mut lists: Vec<InlinedList<u64>> = Vec::with_capacity(10_000);
                for i in 0..10_000u64 {
                    let mut list = InlinedList::new();
                    for j in 0..len as u64 {
                        list.push(i + j);
                    }
                    lists.push(list);
                }
                black_box(lists)
            })
        });

        group.bench_function(format!("vec/{len}"), |b| {
            b.iter(|| {
                let mut lists: Vec<Vec<u64>> = Vec::with_capacity(10_000);
                for i in 0..10_000u64 {
                    let mut list = Vec::new();
                    for j in 0..len as u64 {
                        list.push(i + j);
                    }
                    lists.push(list);
                }
                black_box(lists)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_remove_insert_churn,
    bench_small_list
);
criterion_main!(benches);
