//! Sum-of-squares kernel
//!
//! Computes Σ aᵢ² over a borrowed `i32` sequence and renders the exact value
//! as canonical decimal text.
//!
//! # Accumulator width
//!
//! Squares are widened to `i64` (at most 2⁶²) and summed in `i128`. No slice
//! can hold more than 2⁶¹ `i32`s, so the sum stays below 2¹²³ and overflow is
//! unreachable for every input. Through the C ABI the count is a `c_int`,
//! which bounds the sum even lower, at 2⁹³.

use crate::error::{KernelError, clear_kernel_error, panic_message, set_kernel_error};
use crate::result_buffer::into_handle;
use std::ffi::{c_char, c_int};
use std::panic::{self, UnwindSafe};
use std::ptr;
use std::slice;

/// Exact sum of squares of `values`
#[inline]
pub fn sum_squares(values: &[i32]) -> i128 {
    values
        .iter()
        .map(|&v| {
            let v = v as i64;
            (v * v) as i128
        })
        .sum()
}

/// Render `value` as canonical decimal text
///
/// `"0"` for zero, no leading zeros, and a single leading `-` for negative
/// values.
pub fn render_decimal(value: i128) -> String {
    value.to_string()
}

/// Borrow the caller's buffer as a slice
///
/// A zero count never touches `buffer`, so null or dangling pointers are
/// accepted for empty input.
///
/// # Safety
/// For `count > 0`, `buffer` must point to `count` initialized `i32`s that
/// stay valid and unmodified for `'a`.
unsafe fn input_slice<'a>(buffer: *const i32, count: c_int) -> Result<&'a [i32], KernelError> {
    let len = usize::try_from(count).map_err(|_| KernelError::InvalidLength { count })?;
    if len == 0 {
        return Ok(&[]);
    }
    if buffer.is_null() {
        return Err(KernelError::NullBuffer { count });
    }
    Ok(unsafe { slice::from_raw_parts(buffer, len) })
}

/// Compute the sum of squares of `count` integers at `buffer`
///
/// Returns a NUL-terminated decimal string owned by the caller, who must
/// release it with `free_string` exactly once. On failure returns null and
/// records the reason, readable through `squares_last_error`:
/// - negative `count` → `InvalidLength`
/// - null `buffer` with positive `count` → `NullBuffer`
///
/// Allocation failure aborts the process.
///
/// # Safety
/// For `count > 0`, `buffer` must point to `count` contiguous, initialized
/// `i32`s that remain valid for the duration of the call. The kernel keeps no
/// reference to them after returning.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sum_of_squares(buffer: *const i32, count: c_int) -> *mut c_char {
    guarded(move || {
        // Safety: forwarded from this function's contract
        let values = unsafe { input_slice(buffer, count) }?;
        Ok(render_decimal(sum_squares(values)))
    })
}

/// Run one boundary computation and turn its outcome into a handle
///
/// Clears the error slot first. A failure or a caught panic is recorded and
/// yields null; panics never unwind across the C ABI.
fn guarded<F>(compute: F) -> *mut c_char
where
    F: FnOnce() -> Result<String, KernelError> + UnwindSafe,
{
    clear_kernel_error();

    match panic::catch_unwind(compute) {
        Ok(Ok(text)) => into_handle(text),
        Ok(Err(err)) => {
            set_kernel_error(err);
            ptr::null_mut()
        }
        Err(payload) => {
            set_kernel_error(KernelError::Panicked(panic_message(&*payload)));
            ptr::null_mut()
        }
    }
}
