use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use squares_kernel::{free_string, sum_of_squares, sum_squares};
use std::ffi::c_int;

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

fn bench_sum_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_squares");
    for size in SIZES {
        let values: Vec<i32> = (0..size as i32).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| sum_squares(black_box(values)))
        });
    }
    group.finish();
}

fn bench_boundary_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_call_and_release");
    for size in SIZES {
        let values: Vec<i32> = (0..size as i32).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| unsafe {
                let handle = sum_of_squares(black_box(values.as_ptr()), values.len() as c_int);
                free_string(handle);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sum_squares, bench_boundary_call);
criterion_main!(benches);
