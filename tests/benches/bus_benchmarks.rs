//! # Page-Relay Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Bus `set` / `get` | < 1µs uncontended |
//! | Bus `get` under 8 readers | no writer starvation |
//! | Route param encode + decode of a user | < 10µs |

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pr_02_route_params::RouteParamCodec;
use shared_bus::DataBus;
use shared_types::{Payload, UserInfo};

// ============================================================================
// DATA BUS
// ============================================================================

fn bench_bus_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("bus");
    let bus = DataBus::new();
    let user = Payload::from(UserInfo::new("John Doe", 28));

    group.bench_function("set_overwrite", |b| {
        b.iter(|| bus.set("userInfo", black_box(user.clone())))
    });

    bus.set("userInfo", user.clone());
    group.bench_function("get_hit", |b| b.iter(|| black_box(bus.get("userInfo"))));
    group.bench_function("get_miss", |b| b.iter(|| black_box(bus.get("neverSet"))));

    for size in [10usize, 1_000, 100_000] {
        let populated = DataBus::new();
        for i in 0..size {
            populated.set(format!("key{i}"), Payload::Integer(i as i64));
        }
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("get_in_populated", size), &size, |b, &size| {
            let key = format!("key{}", size / 2);
            b.iter(|| black_box(populated.get(&key)))
        });
    }
    group.finish();
}

fn bench_bus_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("bus-contended");
    group.measurement_time(Duration::from_secs(5));

    for readers in [1usize, 4, 8] {
        group.throughput(Throughput::Elements((readers * 1_000) as u64));
        group.bench_with_input(BenchmarkId::new("readers_with_writer", readers), &readers, |b, &readers| {
            let bus = Arc::new(DataBus::new());
            bus.set("hot", Payload::Integer(0));
            b.iter(|| {
                thread::scope(|s| {
                    s.spawn(|| {
                        for i in 0..1_000 {
                            bus.set("hot", Payload::Integer(i));
                        }
                    });
                    for _ in 0..readers {
                        s.spawn(|| {
                            for _ in 0..1_000 {
                                black_box(bus.get("hot"));
                            }
                        });
                    }
                });
            })
        });
    }
    group.finish();
}

// ============================================================================
// ROUTE PARAMS
// ============================================================================

fn bench_route_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("route-params");
    let codec = RouteParamCodec::default();
    let user = UserInfo::new("John Doe", 28);
    let url = codec
        .url("pages/Detail")
        .param("userInfo", &user)
        .and_then(|b| b.build())
        .map(|u| u.to_string())
        .unwrap_or_default();

    group.bench_function("encode_user", |b| b.iter(|| black_box(codec.encode(&user))));
    group.bench_function("read_user", |b| {
        b.iter(|| black_box(codec.read_param::<UserInfo>(&url, "userInfo")))
    });
    group.finish();
}

criterion_group!(benches, bench_bus_single_thread, bench_bus_contended, bench_route_codec);
criterion_main!(benches);
