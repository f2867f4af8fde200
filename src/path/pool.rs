//! Bounded free-list of [`CleanPathBuffer`]s.
//!
//! A buffer is checked out by [`BufferPool::acquire`] and handed back when the
//! [`PooledBuffer`] guard drops, so every exit path of the caller releases it.
//! Concurrent callers never share a buffer: the free-list lock is held only for the
//! pop/push, never while cleaning.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

use super::clean::CleanPathBuffer;
use crate::runtime_config::clean_pool_size_from_env;

/// Initial capacity of freshly created buffers.
const INITIAL_CAPACITY: usize = 128;

/// Buffers that grew past this are shrunk before going back on the free-list.
const MAX_RETAINED_CAPACITY: usize = 4096;

// sized once from `BRRTR_CLEAN_POOL_SIZE`; shared by every router
static GLOBAL_POOL: Lazy<BufferPool> = Lazy::new(|| BufferPool::new(clean_pool_size_from_env()));

/// Check a buffer out of the process-wide pool.
#[must_use]
pub fn acquire_buffer() -> PooledBuffer<'static> {
    GLOBAL_POOL.acquire()
}

/// Free-list of cleaning buffers holding at most `capacity` idle entries.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<CleanPathBuffer>>,
    capacity: usize,
}

impl BufferPool {
    /// Pool retaining up to `capacity` idle buffers. `0` disables retention.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Take an idle buffer, or create one when the free-list is empty.
    #[must_use]
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buffer = self
            .free
            .lock()
            .pop()
            .unwrap_or_else(|| CleanPathBuffer::with_capacity(INITIAL_CAPACITY));
        PooledBuffer { buffer, pool: self }
    }

    /// Number of idle buffers.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn release(&self, mut buffer: CleanPathBuffer) {
        buffer.reset();
        buffer.shrink_to(MAX_RETAINED_CAPACITY);
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(buffer);
        }
    }
}

/// Checked-out buffer; returns itself to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buffer: CleanPathBuffer,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = CleanPathBuffer;

    fn deref(&self) -> &CleanPathBuffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut CleanPathBuffer {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        // an empty CleanPathBuffer owns no allocation
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
