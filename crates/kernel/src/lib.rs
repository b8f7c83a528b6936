//! Squares Kernel: native sum-of-squares exported over the C ABI
//!
//! The kernel is built as a `cdylib` so a host program can load it at
//! runtime, and as an `rlib` so tests and benches can link it directly.
//!
//! # Boundary contract
//!
//! - `sum_of_squares(buffer, count)` borrows `count` contiguous `i32`s for the
//!   duration of the call and returns a NUL-terminated decimal string
//!   allocated by this library.
//! - `free_string(handle)` releases that string with the same allocator.
//!   Every non-null handle must be released exactly once, after the caller
//!   has finished reading it.
//!
//! # Modules
//!
//! - `squares`: exact accumulation, decimal rendering, the `sum_of_squares` entry point
//! - `result_buffer`: ownership transfer of result text and `free_string`
//! - `error`: thread-local last-error slot for failures reported as null
//! - `memory_stats`: process-wide counters of handed-out result buffers

pub mod error;
pub mod memory_stats;
pub mod result_buffer;
pub mod squares;

// Re-export the safe API
pub use error::{KernelError, clear_kernel_error, take_kernel_error};
pub use memory_stats::{BufferSnapshot, buffer_stats};
pub use squares::{render_decimal, sum_squares};

// Boundary calls (exported for dynamic loading)
pub use error::{squares_clear_error, squares_last_error};
pub use memory_stats::squares_live_buffers;
pub use result_buffer::free_string;
pub use squares::sum_of_squares;
