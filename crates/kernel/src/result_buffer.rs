//! ResultBuffer - kernel-allocated text handed across the C ABI
//!
//! A result buffer is a NUL-terminated `CString` allocated by this library
//! and converted into a raw pointer. Ownership moves to the caller on return
//! and comes back exactly once through `free_string`, which rebuilds the
//! `CString` so the same allocator frees it.
//!
//! # Safety Invariants
//! - Every handle comes from `CString::into_raw` in `into_handle`
//! - A handle is released at most once, by `free_string`
//! - Nothing in the kernel keeps a copy of a handle after returning it

use crate::error::{KernelError, set_kernel_error};
use crate::memory_stats::buffer_stats;
use std::ffi::{CString, c_char};
use std::ptr;

/// Move `text` into a kernel-owned C string and hand out its pointer
///
/// Returns null (with the error recorded) if `text` has an interior NUL.
pub(crate) fn into_handle(text: String) -> *mut c_char {
    match CString::new(text) {
        Ok(cstring) => {
            buffer_stats().record_allocation(cstring.as_bytes_with_nul().len());
            cstring.into_raw()
        }
        Err(_) => {
            set_kernel_error(KernelError::InteriorNul);
            ptr::null_mut()
        }
    }
}

/// Release a result buffer returned by `sum_of_squares`
///
/// Null is a no-op.
///
/// # Safety
/// - `handle` must be null or a pointer previously returned by
///   `sum_of_squares` from this same library
/// - `handle` must not have been released before; releasing twice is
///   undefined behavior
/// - The caller must not read through `handle` after this returns
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(handle: *mut c_char) {
    if handle.is_null() {
        return;
    }
    // Safety: caller guarantees the handle came from `into_handle` and is
    // released once, so rebuilding the CString restores the original owner.
    let cstring = unsafe { CString::from_raw(handle) };
    buffer_stats().record_release(cstring.as_bytes_with_nul().len());
    drop(cstring);
}
