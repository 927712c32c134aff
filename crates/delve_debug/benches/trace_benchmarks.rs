//! Benchmarks for delve_debug.
//!
//! Covers the ring buffer, the tracer fast path and formatting.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use delve_debug::{HumanFormatter, TraceBuffer, TraceEvent, TraceFormatter, Tracer, TracerConfig};
use delve_foundation::{EntityId, Point};

fn moved(i: u64) -> TraceEvent {
    TraceEvent::Moved {
        entity: EntityId::new(i % 16),
        to: Point::new((i % 40) as i32, (i % 20) as i32),
    }
}

// =============================================================================
// Buffer
// =============================================================================

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    for size in [64usize, 1024, 16_384] {
        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("push_evicting", size), &size, |b, &size| {
            b.iter(|| {
                let mut buffer = TraceBuffer::new(size);
                for i in 0..(size as u64 * 2) {
                    buffer.push(i / 8, i, moved(i));
                }
                black_box(buffer.len())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Tracer
// =============================================================================

fn bench_tracer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracer");

    group.bench_function("record_disabled", |b| {
        let mut tracer = Tracer::disabled();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            tracer.record(black_box(moved(i)));
        });
    });

    group.bench_function("record_enabled", |b| {
        let mut tracer = Tracer::new(TracerConfig::new().enabled().with_buffer_size(4096));
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            tracer.record(black_box(moved(i)));
        });
    });

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut buffer = TraceBuffer::new(256);
    for i in 0..256 {
        buffer.push(i / 8, i * 1000, moved(i));
    }
    let records = buffer.recent(256);

    let mut group = c.benchmark_group("format");
    group.bench_function("plain", |b| {
        let f = HumanFormatter::new();
        b.iter(|| black_box(f.format_many(&records)));
    });
    group.bench_function("ids_and_timestamps", |b| {
        let f = HumanFormatter::new().with_ids().with_timestamps();
        b.iter(|| black_box(f.format_many(&records)));
    });
    group.finish();
}

criterion_group!(benches, bench_buffer, bench_tracer, bench_format);
criterion_main!(benches);
