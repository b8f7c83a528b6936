//! Driver ↔ kernel boundary tests
//!
//! The kernel is linked directly and its exported functions are bound into a
//! `KernelFns` table, the same way `NativeLibrary::bind` binds a loaded
//! library. This exercises the full call → decode → release path without
//! needing a built `cdylib` on disk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serial_test::serial;
use squares_bench::host::host_sum_of_squares;
use squares_bench::report::render;
use squares_bench::{DriverError, InputSpec, KernelFns, ReportFormat, run_comparison};

fn linked_kernel() -> KernelFns<'static> {
    // Safety: the kernel is statically linked, so its functions live forever
    unsafe {
        KernelFns::new(
            squares_kernel::sum_of_squares,
            squares_kernel::free_string,
            squares_kernel::squares_last_error,
            squares_kernel::squares_live_buffers,
        )
    }
}

#[test]
#[serial]
fn test_known_results() {
    let kernel = linked_kernel();
    assert_eq!(kernel.sum_of_squares(&[]).unwrap(), "0");
    assert_eq!(kernel.sum_of_squares(&[0, 1, 2, 3, 4]).unwrap(), "30");
}

#[test]
#[serial]
fn test_benchmark_default_scenario() {
    let kernel = linked_kernel();
    let values = InputSpec::Sequential {
        start: 0,
        size: 1_000_000,
    }
    .build()
    .unwrap();

    let comparison = run_comparison(&kernel, &values, 1).unwrap();
    assert_eq!(comparison.host.result, "333332833333500000");
    assert_eq!(comparison.native.result, "333332833333500000");
    assert!(comparison.agree());
    assert_eq!(comparison.elements, 1_000_000);
    assert_eq!(kernel.live_buffers(), 0);
}

#[test]
#[serial]
fn test_host_and_native_agree_on_random_sequences() {
    let kernel = linked_kernel();
    let lengths = [0usize, 1, 100, 10_000, 1_000_000];
    let ranges = [
        (i32::MIN, i32::MAX),
        (-1_000, 1_000),
        (-1, 0),
        (0, 1_000_000),
    ];
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut checked = 0;

    for &len in &lengths {
        for &(min, max) in &ranges {
            let values: Vec<i32> = (0..len).map(|_| rng.gen_range(min..=max)).collect();
            let native = kernel.sum_of_squares(&values).unwrap();
            let host = host_sum_of_squares(&values).to_string();
            assert_eq!(native, host, "len={} range={}..={}", len, min, max);
            checked += 1;
        }
    }

    assert!(checked >= 20);
    assert_eq!(kernel.live_buffers(), 0);
}

#[test]
#[serial]
fn test_repeated_calls_release_every_buffer() {
    let kernel = linked_kernel();
    let values: Vec<i32> = (0..1_000).collect();
    let before = kernel.live_buffers();

    for _ in 0..10_000 {
        kernel.sum_of_squares(&values).unwrap();
    }

    assert_eq!(kernel.live_buffers(), before);
}

#[test]
#[serial]
fn test_guard_holds_buffer_until_dropped() {
    let kernel = linked_kernel();
    let before = kernel.live_buffers();

    let native = kernel.call(&[3, 4]).unwrap();
    assert_eq!(native.to_str().unwrap(), "25");
    assert_eq!(kernel.live_buffers(), before + 1);

    drop(native);
    assert_eq!(kernel.live_buffers(), before);
}

#[test]
#[serial]
fn test_multiple_runs_keep_results() {
    let kernel = linked_kernel();
    let values: Vec<i32> = (-500..500).collect();

    let comparison = run_comparison(&kernel, &values, 3).unwrap();
    assert_eq!(comparison.runs, 3);
    assert!(comparison.agree());
    assert_eq!(kernel.live_buffers(), 0);
}

#[test]
#[serial]
fn test_zero_runs_treated_as_one() {
    let kernel = linked_kernel();
    let comparison = run_comparison(&kernel, &[1, 2], 0).unwrap();
    assert_eq!(comparison.runs, 1);
    assert_eq!(comparison.native.result, "5");
}

#[test]
#[serial]
fn test_report_from_live_comparison() {
    let kernel = linked_kernel();
    let comparison = run_comparison(&kernel, &[0, 1, 2, 3, 4], 1).unwrap();
    let out = render(&comparison, ReportFormat::Human).unwrap();

    assert!(out.contains("Host Result: 30"));
    assert!(out.contains("Native Result: 30"));
    assert!(out.contains("Host Time: "));
    assert!(out.contains("Native Time: "));
    // The speed-up line appears exactly when the native time is non-zero
    assert_eq!(
        out.contains("Performance Improvement"),
        comparison.speed_up().is_some()
    );
}

#[test]
fn test_kernel_failure_message_is_surfaced() {
    // A stand-in kernel that always fails, sharing the real error slot
    unsafe extern "C" fn failing(_: *const i32, count: std::ffi::c_int) -> *mut std::ffi::c_char {
        unsafe { squares_kernel::sum_of_squares(std::ptr::null(), -1 - count.abs()) }
    }

    let kernel = unsafe {
        KernelFns::new(
            failing,
            squares_kernel::free_string,
            squares_kernel::squares_last_error,
            squares_kernel::squares_live_buffers,
        )
    };

    match kernel.sum_of_squares(&[1, 2, 3]) {
        Err(DriverError::KernelFailure(msg)) => {
            assert_eq!(msg, "invalid length: count -4 is negative");
        }
        other => panic!("Expected KernelFailure, got {:?}", other),
    }
}
