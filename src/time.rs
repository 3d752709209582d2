//! Wall clock and fixed-period interval timers.
//!
//! `draw_web()` calls at ~60fps with variable delta. Instead of counting
//! frames, each [`IntervalTimer`] remembers when it is next due and the
//! engine fires it whenever the clock has passed that point. The clock is
//! injected, so timer behaviour is fully testable without a browser.

use std::cell::Cell;
use std::rc::Rc;

/// Source of epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// The real clock: `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() as u64
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        }
    }
}

/// A clock moved by hand. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self(Rc::new(Cell::new(now_ms)))
    }

    pub fn set(&self, now_ms: u64) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.0.set(self.0.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// A repeating timer with a bounded backlog.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    period_ms: u64,
    /// Most overdue firings kept after a long gap (tab backgrounded).
    max_backlog: u32,
    next_due_ms: Option<u64>,
}

impl IntervalTimer {
    /// A disarmed timer. `period_ms` is raised to at least 1.
    pub fn new(period_ms: u64, max_backlog: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            max_backlog: max_backlog.max(1),
            next_due_ms: None,
        }
    }

    /// Start counting a full period from `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// The due time of the next firing, if it has been reached.
    pub fn next_due(&self, now_ms: u64) -> Option<u64> {
        self.next_due_ms.filter(|&due| due <= now_ms)
    }

    /// Consume one firing.
    pub fn fire(&mut self) {
        if let Some(due) = self.next_due_ms {
            self.next_due_ms = Some(due.saturating_add(self.period_ms));
        }
    }

    /// Skip overdue firings beyond the backlog. Returns how many were skipped.
    pub fn drop_backlog(&mut self, now_ms: u64) -> u32 {
        let Some(due) = self.next_due(now_ms) else {
            return 0;
        };
        let overdue = (now_ms - due) / self.period_ms + 1;
        let keep = u64::from(self.max_backlog);
        if overdue <= keep {
            return 0;
        }
        let skipped = overdue - keep;
        self.next_due_ms = Some(due + skipped * self.period_ms);
        u32::try_from(skipped).unwrap_or(u32::MAX)
    }
}
