//! NativeString - result text owned by the driver, allocated by the kernel
//!
//! The kernel hands back a raw NUL-terminated string. Wrapping it in
//! `NativeString` turns the release obligation into `Drop`: the kernel's own
//! `free_string` runs exactly once, and borrows of the text cannot outlive
//! the guard.

use std::ffi::{CStr, c_char};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::str::Utf8Error;

/// Release function exported by the kernel
pub type FreeStringFn = unsafe extern "C" fn(*mut c_char);

/// Kernel-allocated string that releases itself through the kernel
///
/// # Safety Invariants
/// - `ptr` came from the kernel whose `release` function is stored here
/// - `ptr` is released once, in `Drop`, and never read afterwards
/// - `'lib` is bounded by the loaded library so `release` stays callable
pub struct NativeString<'lib> {
    ptr: NonNull<c_char>,
    release: FreeStringFn,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> NativeString<'lib> {
    /// Take ownership of a kernel result handle
    ///
    /// Returns `None` for a null handle (nothing to release).
    ///
    /// # Safety
    /// `ptr` must be null or a live handle produced by the kernel that
    /// exports `release`, not yet released and not owned by anything else.
    pub unsafe fn from_raw(ptr: *mut c_char, release: FreeStringFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| NativeString {
            ptr,
            release,
            _library: PhantomData,
        })
    }

    /// Borrow the bytes up to the NUL terminator
    pub fn as_c_str(&self) -> &CStr {
        // Safety: the kernel guarantees NUL termination and the buffer lives
        // until Drop
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// Decode the text as UTF-8
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        self.as_c_str().to_str()
    }
}

impl Drop for NativeString<'_> {
    fn drop(&mut self) {
        // Safety: constructed from a live kernel handle, released only here
        unsafe { (self.release)(self.ptr.as_ptr()) }
    }
}

impl fmt::Debug for NativeString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeString({:?})", self.as_c_str())
    }
}
