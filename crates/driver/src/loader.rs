//! Kernel loading and boundary calls
//!
//! `NativeLibrary` opens the kernel `cdylib`; `bind` resolves its exported
//! symbols into a `KernelFns` table borrowed from the library, so no function
//! pointer can outlive the code it points into.
//!
//! All boundary traffic goes through `KernelFns::sum_of_squares`, which owns
//! the full call → decode → release sequence.

use crate::error::DriverError;
use crate::native_string::{FreeStringFn, NativeString};
use libloading::Library;
use std::ffi::{CStr, c_char, c_int};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `sum_of_squares(buffer, count) -> handle`
pub type SumOfSquaresFn = unsafe extern "C" fn(*const i32, c_int) -> *mut c_char;
/// `squares_last_error() -> borrowed message or null`
pub type LastErrorFn = unsafe extern "C" fn() -> *const c_char;
/// `squares_live_buffers() -> outstanding result buffers`
pub type LiveBuffersFn = unsafe extern "C" fn() -> u64;

const SUM_OF_SQUARES: &str = "sum_of_squares";
const FREE_STRING: &str = "free_string";
const LAST_ERROR: &str = "squares_last_error";
const LIVE_BUFFERS: &str = "squares_live_buffers";

/// A loaded kernel library
pub struct NativeLibrary {
    library: Library,
    path: PathBuf,
}

impl NativeLibrary {
    /// Open the kernel library at `path`
    ///
    /// Failure here is fatal for the driver: nothing is computed without a
    /// kernel.
    pub fn open(path: &Path) -> Result<Self, DriverError> {
        info!("Loading kernel library {}", path.display());
        // Safety: the kernel has no initialization routines with side effects
        let library = unsafe { Library::new(path) }.map_err(|source| DriverError::LibraryLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(NativeLibrary {
            library,
            path: path.to_path_buf(),
        })
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve every kernel symbol
    pub fn bind(&self) -> Result<KernelFns<'_>, DriverError> {
        // Safety: each symbol is declared with the signature the kernel
        // exports it with
        unsafe {
            let fns = KernelFns::new(
                self.symbol::<SumOfSquaresFn>(SUM_OF_SQUARES)?,
                self.symbol::<FreeStringFn>(FREE_STRING)?,
                self.symbol::<LastErrorFn>(LAST_ERROR)?,
                self.symbol::<LiveBuffersFn>(LIVE_BUFFERS)?,
            );
            debug!("Bound kernel symbols from {}", self.path.display());
            Ok(fns)
        }
    }

    /// Look up one function symbol and copy out its pointer
    ///
    /// # Safety
    /// `T` must match the exported symbol's real type.
    unsafe fn symbol<T: Copy>(&self, name: &'static str) -> Result<T, DriverError> {
        let symbol = unsafe { self.library.get::<T>(name.as_bytes()) }
            .map_err(|source| DriverError::MissingSymbol {
                symbol: name,
                source,
            })?;
        Ok(*symbol)
    }
}

/// Function table for one kernel, valid for `'lib`
pub struct KernelFns<'lib> {
    sum_of_squares: SumOfSquaresFn,
    free_string: FreeStringFn,
    last_error: LastErrorFn,
    live_buffers: LiveBuffersFn,
    _library: PhantomData<&'lib ()>,
}

impl<'lib> KernelFns<'lib> {
    /// Build a table from raw function pointers
    ///
    /// # Safety
    /// All four pointers must come from the same kernel and remain callable
    /// for `'lib`.
    pub unsafe fn new(
        sum_of_squares: SumOfSquaresFn,
        free_string: FreeStringFn,
        last_error: LastErrorFn,
        live_buffers: LiveBuffersFn,
    ) -> Self {
        KernelFns {
            sum_of_squares,
            free_string,
            last_error,
            live_buffers,
            _library: PhantomData,
        }
    }

    /// Call the kernel and take ownership of its result handle
    ///
    /// The returned guard releases the buffer when dropped.
    pub fn call(&self, values: &[i32]) -> Result<NativeString<'lib>, DriverError> {
        let count = c_int::try_from(values.len())
            .map_err(|_| DriverError::InvalidLength(values.len()))?;

        // Safety: `values` is a live slice of exactly `count` elements for
        // the duration of the call; the kernel retains nothing
        let handle = unsafe { (self.sum_of_squares)(values.as_ptr(), count) };

        // Safety: the handle is fresh from this kernel and owned by nobody else
        unsafe { NativeString::from_raw(handle, self.free_string) }
            .ok_or_else(|| DriverError::KernelFailure(self.last_error_message()))
    }

    /// Call, decode and release in one step
    ///
    /// The result buffer is released before this returns, whether or not
    /// decoding succeeded.
    pub fn sum_of_squares(&self, values: &[i32]) -> Result<String, DriverError> {
        let native = self.call(values)?;
        let text = native.to_str()?.to_owned();
        drop(native);
        Ok(text)
    }

    /// Message for the kernel's last error on this thread
    pub fn last_error_message(&self) -> String {
        // Safety: the kernel returns null or a NUL-terminated string it owns,
        // valid until its next call on this thread; we copy it immediately
        unsafe {
            let ptr = (self.last_error)();
            if ptr.is_null() {
                "kernel returned null without an error message".to_string()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        }
    }

    /// Result buffers the kernel has handed out and not yet had back
    pub fn live_buffers(&self) -> u64 {
        // Safety: reads atomic counters only
        unsafe { (self.live_buffers)() }
    }
}
