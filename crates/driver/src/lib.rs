//! Squares Bench: host loop versus native kernel
//!
//! Loads the squares kernel as a dynamic library, computes the same sum of
//! squares with a host-side arbitrary-precision loop and through the C ABI,
//! and reports both results, both timings and the speed-up.
//!
//! # Modules
//!
//! - `platform`: platform family to kernel library file name
//! - `config`: defaults, TOML config file, CLI overrides
//! - `loader`: dynamic loading and symbol binding
//! - `native_string`: owning guard for kernel-allocated result text
//! - `input`: sequential or seeded random input sequences
//! - `host`: the host-side reference computation
//! - `bench`: timed comparison of host and native runs
//! - `report`: human and JSON output
//! - `error`: driver error type

pub mod bench;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod loader;
pub mod native_string;
pub mod platform;
pub mod report;

pub use bench::{Comparison, Measurement, run_comparison};
pub use config::{BenchConfig, ConfigOverrides};
pub use error::DriverError;
pub use input::InputSpec;
pub use loader::{KernelFns, NativeLibrary};
pub use native_string::NativeString;
pub use platform::Platform;
pub use report::ReportFormat;
