use crate::parameters::Parameters;
use math::poly::PolyRNS;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;
use tracing::trace;

/// Working buffers of one share generation: two elements over QP.
pub struct Scratch {
    pub(crate) delta: PolyRNS<u64>,
    pub(crate) tmp: PolyRNS<u64>,
}

impl Scratch {
    pub fn new(params: &Parameters) -> Self {
        Self {
            delta: params.ring_qp().new_polyrns(),
            tmp: params.ring_qp().new_polyrns(),
        }
    }

    pub(crate) fn fits(&self, params: &Parameters) -> bool {
        self.delta.n() == params.n()
            && self.delta.level() + 1 == params.count_qp()
            && self.tmp.n() == params.n()
            && self.tmp.level() + 1 == params.count_qp()
    }
}

/// Pool of [Scratch] buffers for callers sharing one generator across threads.
/// Buffers are created on demand and returned to the pool when the guard drops.
pub struct ScratchPool {
    params: Parameters,
    free: Mutex<Vec<Scratch>>,
}

impl ScratchPool {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
            free: Mutex::new(Vec::new()),
        }
    }

    pub fn acquire(&self) -> ScratchGuard<'_> {
        let reused: Option<Scratch> = self.free.lock().unwrap_or_else(|e| e.into_inner()).pop();
        let scratch: Scratch = match reused {
            Some(scratch) => scratch,
            None => {
                trace!("allocating scratch");
                Scratch::new(&self.params)
            }
        };
        ScratchGuard {
            pool: self,
            scratch: Some(scratch),
        }
    }

    /// Number of idle buffers.
    pub fn available(&self) -> usize {
        self.free.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn release(&self, scratch: Scratch) {
        self.free
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(scratch);
    }
}

pub struct ScratchGuard<'a> {
    pool: &'a ScratchPool,
    scratch: Option<Scratch>,
}

impl Deref for ScratchGuard<'_> {
    type Target = Scratch;

    fn deref(&self) -> &Scratch {
        match &self.scratch {
            Some(scratch) => scratch,
            None => unreachable!("scratch taken before drop"),
        }
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut Scratch {
        match &mut self.scratch {
            Some(scratch) => scratch,
            None => unreachable!("scratch taken before drop"),
        }
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.pool.release(scratch);
        }
    }
}
