//! Timed comparison of the host loop and the native kernel
//!
//! Host timing covers the computation only; the input is built beforehand.
//! Native timing covers the boundary call, decoding the returned text and
//! releasing the kernel's buffer.

use crate::error::DriverError;
use crate::host::host_sum_of_squares;
use crate::loader::KernelFns;
use std::time::Instant;
use tracing::debug;

/// Seconds are reported with this many decimal places
pub const TIME_DECIMALS: usize = 4;

/// One side of the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Decimal text of the computed sum
    pub result: String,
    /// Best wall-clock time across runs, in seconds
    pub seconds: f64,
}

impl Measurement {
    /// Seconds as printed in the report
    pub fn display_seconds(&self) -> String {
        format!("{:.*}", TIME_DECIMALS, self.seconds)
    }

    /// True when the reported time reads as zero
    pub fn rounds_to_zero(&self) -> bool {
        self.display_seconds().bytes().all(|b| b == b'0' || b == b'.')
    }
}

/// Host and native results for the same input
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub elements: usize,
    pub runs: u32,
    pub host: Measurement,
    pub native: Measurement,
}

impl Comparison {
    /// Both sides produced the same decimal text
    pub fn agree(&self) -> bool {
        self.host.result == self.native.result
    }

    /// Host time divided by native time
    ///
    /// `None` when the native time reads as zero at report precision, so the
    /// ratio is never a division by zero.
    pub fn speed_up(&self) -> Option<f64> {
        if self.native.rounds_to_zero() || self.native.seconds <= 0.0 {
            None
        } else {
            Some(self.host.seconds / self.native.seconds)
        }
    }
}

/// Run host and native computations `runs` times each and keep the best times
///
/// A `runs` of zero is treated as one.
pub fn run_comparison(
    kernel: &KernelFns<'_>,
    values: &[i32],
    runs: u32,
) -> Result<Comparison, DriverError> {
    let runs = runs.max(1);
    let (mut host, mut native) = measure_once(kernel, values, 1, runs)?;

    for run in 2..=runs {
        let (h, n) = measure_once(kernel, values, run, runs)?;
        keep_best(&mut host, h);
        keep_best(&mut native, n);
    }

    Ok(Comparison {
        elements: values.len(),
        runs,
        host,
        native,
    })
}

/// Time one host pass and one native pass over `values`
fn measure_once(
    kernel: &KernelFns<'_>,
    values: &[i32],
    run: u32,
    runs: u32,
) -> Result<(Measurement, Measurement), DriverError> {
    let start = Instant::now();
    let host_result = host_sum_of_squares(values);
    let host_seconds = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let native_result = kernel.sum_of_squares(values)?;
    let native_seconds = start.elapsed().as_secs_f64();

    debug!(
        "run {}/{}: host {:.6}s, native {:.6}s",
        run, runs, host_seconds, native_seconds
    );

    Ok((
        Measurement {
            result: host_result.to_string(),
            seconds: host_seconds,
        },
        Measurement {
            result: native_result,
            seconds: native_seconds,
        },
    ))
}

fn keep_best(best: &mut Measurement, candidate: Measurement) {
    if candidate.seconds < best.seconds {
        *best = candidate;
    }
}
