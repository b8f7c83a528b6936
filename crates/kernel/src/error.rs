//! Kernel Error Handling
//!
//! Boundary calls never panic across the C ABI. A failing call returns null
//! and records what went wrong in a thread-local slot the caller can inspect:
//!
//! ```ignore
//! let handle = sum_of_squares(buffer, -1);
//! if handle.is_null() {
//!     let msg = squares_last_error(); // "invalid length: count -1 is negative"
//! }
//! ```
//!
//! The slot is cleared at the start of every `sum_of_squares` call, so it
//! always describes the most recent call on the current thread.

use std::any::Any;
use std::cell::RefCell;
use std::ffi::{CString, c_char};
use std::fmt;
use std::ptr;

/// Failure kinds reported by `sum_of_squares`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The element count was negative
    InvalidLength { count: i32 },
    /// A non-empty input was passed with a null buffer
    NullBuffer { count: i32 },
    /// The rendered text contained an interior NUL byte
    InteriorNul,
    /// The computation panicked; the payload message is preserved
    Panicked(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidLength { count } => {
                write!(f, "invalid length: count {} is negative", count)
            }
            KernelError::NullBuffer { count } => {
                write!(f, "null buffer: expected {} elements", count)
            }
            KernelError::InteriorNul => write!(f, "result text contains an interior NUL byte"),
            KernelError::Panicked(msg) => write!(f, "kernel panicked: {}", msg),
        }
    }
}

impl std::error::Error for KernelError {}

thread_local! {
    /// Last error raised on this thread
    static LAST_ERROR: RefCell<Option<KernelError>> = const { RefCell::new(None) };

    /// Cached C string backing the pointer handed out by `squares_last_error`
    static ERROR_CSTRING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Record an error for the current thread
///
/// Drops any cached C string so no stale message pointer survives.
pub fn set_kernel_error(err: KernelError) {
    tracing::debug!("kernel error: {}", err);
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(err));
}

/// Take (and clear) the last error on this thread
pub fn take_kernel_error() -> Option<KernelError> {
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Peek at the last error without clearing it
pub fn last_kernel_error() -> Option<KernelError> {
    LAST_ERROR.with(|e| e.borrow().clone())
}

/// Clear any pending error on this thread
pub fn clear_kernel_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
}

/// Text carried by a caught panic
///
/// `panic!` payloads are a `&'static str` for literal messages and a `String`
/// for formatted ones; anything else has no readable text.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic without a message".to_owned())
}

/// Get the last error message as a C string pointer (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # WARNING: Pointer Lifetime
/// The pointer is owned by the kernel and stays valid only until the next
/// boundary call on the same thread. Callers copy the text immediately and
/// never pass it to `free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn squares_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(err) => ERROR_CSTRING.with(|cs| {
            // Replace null bytes with '?' to preserve error content
            let safe_msg: String = err
                .to_string()
                .chars()
                .map(|c| if c == '\0' { '?' } else { c })
                .collect();
            match CString::new(safe_msg) {
                Ok(cstring) => {
                    let ptr = cstring.as_ptr();
                    *cs.borrow_mut() = Some(cstring);
                    ptr
                }
                Err(_) => ptr::null(),
            }
        }),
        None => ptr::null(),
    })
}

/// Clear any pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn squares_clear_error() {
    clear_kernel_error();
}
