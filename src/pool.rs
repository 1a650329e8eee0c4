use alloc::vec::Vec;

/// Allocation capability handed to every operation that owns memory.
///
/// Each call site passes its own pool, so independent configurations can
/// coexist in one process. Blocks come back zeroed (`T::default()`), and every
/// block handed out is returned through [`PoolAllocator::free`] exactly once.
pub trait PoolAllocator {
    /// Returns a block of `len` default-initialized elements, or `None` when
    /// the pool is exhausted.
    fn alloc<T: Default>(&self, len: usize) -> Option<Vec<T>>;

    fn free<T>(&self, block: Vec<T>);
}

/// Pool backed by the global allocator, reserving fallibly.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct SystemPool;

impl PoolAllocator for SystemPool {
    fn alloc<T: Default>(&self, len: usize) -> Option<Vec<T>> {
        let mut block = Vec::new();
        if block.try_reserve_exact(len).is_err() {
            error!("pool exhausted reserving {} elements", len);
            return None;
        }
        block.resize_with(len, T::default);
        Some(block)
    }

    fn free<T>(&self, block: Vec<T>) {
        drop(block);
    }
}
