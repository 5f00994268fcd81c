use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};

use crate::gpio::{
    GpioError,
    mapper::RegisterMapper,
    regs::{GPIO_PHYS_BASE, WINDOW_LEN},
    view::RegisterView,
};

struct WindowState<M: RegisterMapper> {
    mapper: M,
    // Some(_) exactly while `count > 0`.
    block: Option<M::Block>,
    count: usize,
}

/// The shared, reference-counted GPIO register window.
///
/// The block is mapped by the first [`acquire`](Self::acquire) and
/// unmapped when the last [`WindowLease`] is dropped. The open count and
/// every register access are serialized by one critical section.
pub struct RegisterWindow<M: RegisterMapper> {
    state: Mutex<RefCell<WindowState<M>>>,
}

impl<M: RegisterMapper> core::fmt::Debug for RegisterWindow<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterWindow")
            .field("open_count", &self.open_count())
            .finish_non_exhaustive()
    }
}

impl<M: RegisterMapper> RegisterWindow<M> {
    pub const fn new(mapper: M) -> Self {
        Self {
            state: Mutex::new(RefCell::new(WindowState {
                mapper,
                block: None,
                count: 0,
            })),
        }
    }

    /// Takes a reference on the window, mapping it if this is the first.
    ///
    /// On a map failure the open count is left unchanged.
    pub fn acquire(&self) -> Result<WindowLease<'_, M>, GpioError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.count == 0 {
                let block = state.mapper.map(GPIO_PHYS_BASE, WINDOW_LEN).map_err(|_| {
                    log::error!("gpio: can not map {:#x}+{:#x}", GPIO_PHYS_BASE, WINDOW_LEN);
                    GpioError::Map
                })?;
                state.block = Some(block);
                log::debug!("gpio: mapped register window at {:#x}", GPIO_PHYS_BASE);
            }
            state.count += 1;
            Ok::<(), GpioError>(())
        })?;

        Ok(WindowLease { window: self })
    }

    /// Drops one reference, unmapping the window when none remain.
    ///
    /// Returns `Lifecycle` without touching any state if nothing is held.
    pub(crate) fn release(&self) -> Result<(), GpioError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.count == 0 {
                log::warn!("gpio: release without matching acquire");
                return Err(GpioError::Lifecycle);
            }
            state.count -= 1;
            if state.count == 0 {
                if let Some(block) = state.block.take() {
                    state.mapper.unmap(block);
                    log::debug!("gpio: unmapped register window");
                }
            }
            Ok(())
        })
    }

    /// Number of outstanding leases.
    pub fn open_count(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).count)
    }

    pub fn is_mapped(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).block.is_some())
    }

    /// Runs `f` with shared access to the platform mapper.
    pub fn with_mapper<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        critical_section::with(|cs| f(&self.state.borrow_ref(cs).mapper))
    }

    fn view_in<R>(
        &self,
        cs: CriticalSection<'_>,
        f: impl FnOnce(&mut RegisterView<'_, M::Block>) -> R,
    ) -> Result<R, GpioError> {
        let mut state = self.state.borrow_ref_mut(cs);
        let block = state.block.as_mut().ok_or(GpioError::Lifecycle)?;
        let mut view = RegisterView::new(block);
        Ok(f(&mut view))
    }
}

/// Where a controller leases its register window from.
///
/// Implemented for an owned [`RegisterWindow`] and for a shared
/// `&RegisterWindow`, so several device families can lease from one
/// window (for example a `static`) and map the block only once.
pub trait WindowSource {
    type Mapper: RegisterMapper;

    fn window(&self) -> &RegisterWindow<Self::Mapper>;
}

impl<M: RegisterMapper> WindowSource for RegisterWindow<M> {
    type Mapper = M;

    fn window(&self) -> &RegisterWindow<M> {
        self
    }
}

impl<M: RegisterMapper> WindowSource for &RegisterWindow<M> {
    type Mapper = M;

    fn window(&self) -> &RegisterWindow<M> {
        self
    }
}

/// One reference on a [`RegisterWindow`].
///
/// Register access is only possible through a lease, so the mapped block
/// is never touched while the window is unmapped. Dropping the lease
/// releases the reference.
pub struct WindowLease<'a, M: RegisterMapper> {
    window: &'a RegisterWindow<M>,
}

impl<'a, M: RegisterMapper> core::fmt::Debug for WindowLease<'a, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowLease").finish_non_exhaustive()
    }
}

impl<'a, M: RegisterMapper> WindowLease<'a, M> {
    /// Runs `f` against the registers inside a critical section.
    pub fn with_view<R>(
        &self,
        f: impl FnOnce(&mut RegisterView<'_, M::Block>) -> R,
    ) -> Result<R, GpioError> {
        critical_section::with(|cs| self.window.view_in(cs, f))
    }

    /// Like [`with_view`](Self::with_view) for callers already holding the
    /// critical section.
    pub fn with_view_in<R>(
        &self,
        cs: CriticalSection<'_>,
        f: impl FnOnce(&mut RegisterView<'_, M::Block>) -> R,
    ) -> Result<R, GpioError> {
        self.window.view_in(cs, f)
    }

    pub fn window(&self) -> &'a RegisterWindow<M> {
        self.window
    }
}

impl<'a, M: RegisterMapper> Drop for WindowLease<'a, M> {
    fn drop(&mut self) {
        // Cannot fail: this lease holds one of the counted references.
        let _ = self.window.release();
    }
}
