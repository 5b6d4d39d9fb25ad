use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Global allocator that tracks live heap bytes, their high-water mark and
/// the number of allocation calls.
pub struct BudgetAlloc {
    live: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

/// Counters captured after a measured region.
#[derive(Clone, Copy, Debug)]
pub struct HeapUsage {
    pub peak_bytes: usize,
    pub alloc_calls: usize,
}

impl BudgetAlloc {
    pub const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Run `op` and report heap use above what was live when it started.
    pub fn measure<T>(&self, op: impl FnOnce() -> T) -> (T, HeapUsage) {
        let baseline = self.live.load(Ordering::SeqCst);
        self.peak.store(baseline, Ordering::SeqCst);
        self.calls.store(0, Ordering::SeqCst);
        let out = op();
        let usage = HeapUsage {
            peak_bytes: self.peak.load(Ordering::SeqCst).saturating_sub(baseline),
            alloc_calls: self.calls.load(Ordering::SeqCst),
        };
        (out, usage)
    }

    fn grow(&self, bytes: usize) {
        let live = self.live.fetch_add(bytes, Ordering::SeqCst) + bytes;
        self.peak.fetch_max(live, Ordering::SeqCst);
    }

    fn shrink(&self, bytes: usize) {
        let _ = self
            .live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |live| {
                Some(live.saturating_sub(bytes))
            });
    }
}

unsafe impl GlobalAlloc for BudgetAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            if new_size >= layout.size() {
                self.grow(new_size - layout.size());
            } else {
                self.shrink(layout.size() - new_size);
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
        new_ptr
    }
}
