//! Result buffer accounting
//!
//! Counts every result buffer the kernel hands out and every buffer handed
//! back through `free_string`. The difference is the number of live buffers
//! a caller still owns; after a well-behaved run it returns to zero.
//!
//! # Performance
//!
//! - **Updates**: one relaxed `fetch_add` per allocation or release
//! - **Reads**: only when a caller asks for a snapshot
//!
//! Counters are process-wide atomics, so concurrent callers on separate
//! threads are still counted correctly.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters for result buffers
#[derive(Debug)]
pub struct BufferStats {
    /// Buffers handed out by `sum_of_squares` (lifetime counter)
    allocated: AtomicU64,
    /// Buffers returned through `free_string` (lifetime counter)
    released: AtomicU64,
    /// Bytes currently held by live buffers, including NUL terminators
    live_bytes: AtomicU64,
}

impl BufferStats {
    const fn new() -> Self {
        Self {
            allocated: AtomicU64::new(0),
            released: AtomicU64::new(0),
            live_bytes: AtomicU64::new(0),
        }
    }

    /// Record a buffer of `bytes` bytes leaving the kernel
    #[inline]
    pub fn record_allocation(&self, bytes: usize) {
        self.allocated.fetch_add(1, Ordering::Relaxed);
        self.live_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Record a buffer of `bytes` bytes coming back for release
    #[inline]
    pub fn record_release(&self, bytes: usize) {
        self.released.fetch_add(1, Ordering::Relaxed);
        self.live_bytes.fetch_sub(bytes as u64, Ordering::Relaxed);
    }

    /// Current counter values
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            allocated: self.allocated.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            live_bytes: self.live_bytes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the buffer counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub allocated: u64,
    pub released: u64,
    pub live_bytes: u64,
}

impl BufferSnapshot {
    /// Buffers handed out and not yet released
    pub fn live(&self) -> u64 {
        self.allocated.saturating_sub(self.released)
    }
}

static BUFFER_STATS: BufferStats = BufferStats::new();

/// Get the global buffer counters
pub fn buffer_stats() -> &'static BufferStats {
    &BUFFER_STATS
}

/// Number of result buffers handed out and not yet released (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn squares_live_buffers() -> u64 {
    BUFFER_STATS.snapshot().live()
}
