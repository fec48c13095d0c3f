//! Coalesces bursts of relayout requests into one run per tick.
//!
//! Any number of `request` calls between two ticks produce exactly one pending run.
//! The host drains it with `take` at the start of its next tick (next frame in
//! the editor). The optional wake callback fires once per burst so an idle host knows
//! to schedule that tick.

type Wake = Box<dyn Fn()>;

#[derive(Default)]
pub struct CoalescingScheduler {
    pending: bool,
    requests: usize,
    wake: Option<Wake>,
}

impl CoalescingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_wake(&mut self, wake: impl Fn() + 'static) {
        self.wake = Some(Box::new(wake));
    }

    /// Marks a run as pending. Returns true only for the first request of a burst.
    pub fn request(&mut self) -> bool {
        self.requests += 1;
        if self.pending {
            return false;
        }
        self.pending = true;
        if let Some(wake) = &self.wake {
            wake();
        }
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the pending run and reports whether there was one.
    pub fn take(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        let coalesced = std::mem::take(&mut self.requests);
        self.pending = false;
        log::trace!("Running coalesced relayout for {coalesced} request(s)");
        true
    }
}
