#![allow(unsafe_code)]

use core::ptr::NonNull;

use crate::gpio::{
    error::MapError,
    regs::{MmioBlock, RegisterBlock},
};

/// Maps and unmaps the physical register range.
///
/// Supplied by the platform: an `ioremap` wrapper inside a kernel, a page
/// table entry on a microkernel, or [`StaticMapper`] on bare metal.
pub trait RegisterMapper {
    /// Register access handed out while mapped.
    type Block: RegisterBlock;

    /// Maps `len` bytes starting at the physical address `phys_base`.
    fn map(&mut self, phys_base: usize, len: usize) -> Result<Self::Block, MapError>;

    /// Releases a block previously returned by [`map`](Self::map).
    fn unmap(&mut self, block: Self::Block);
}

/// Mapper for a window that is already reachable at a fixed virtual address.
#[derive(Debug)]
pub struct StaticMapper {
    virt_base: NonNull<u32>,
}

// The address is only dereferenced through blocks owned by the window.
unsafe impl Send for StaticMapper {}

impl StaticMapper {
    /// # Safety
    /// `virt_base` must satisfy the requirements of [`MmioBlock::new`] for
    /// the whole lifetime of the mapper.
    pub const unsafe fn new(virt_base: NonNull<u32>) -> Self {
        Self { virt_base }
    }
}

impl RegisterMapper for StaticMapper {
    type Block = MmioBlock;

    fn map(&mut self, _phys_base: usize, _len: usize) -> Result<MmioBlock, MapError> {
        Ok(unsafe { MmioBlock::new(self.virt_base) })
    }

    fn unmap(&mut self, _block: MmioBlock) {}
}
