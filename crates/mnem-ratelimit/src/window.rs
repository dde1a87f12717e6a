use std::collections::VecDeque;
use std::sync::Mutex;

/// A sliding-window log: admits a request if the number of timestamps
/// within the trailing `window_ms` is below `cap`, else denies with a
/// retry-after (spec §4.6).
pub struct SlidingWindowLog {
    cap: u32,
    window_ms: u64,
    log: Mutex<VecDeque<u64>>,
}

pub enum Admission {
    Allowed,
    Denied { retry_after_ms: u64 },
}

impl SlidingWindowLog {
    pub fn new(cap: u32, window_ms: u64) -> SlidingWindowLog {
        SlidingWindowLog {
            cap,
            window_ms,
            log: Mutex::new(VecDeque::new()),
        }
    }

    /// Record `now_ms` and decide admission. Prunes timestamps older than
    /// `now_ms - window_ms` from the log first.
    pub fn admit(&self, now_ms: u64) -> Admission {
        let mut log = self.log.lock().unwrap();
        Self::prune(&mut log, now_ms, self.window_ms);

        if (log.len() as u32) >= self.cap {
            let oldest = *log.front().expect("cap > 0 implies a full log is non-empty");
            let retry_after_ms = (oldest + self.window_ms).saturating_sub(now_ms).max(1000);
            return Admission::Denied { retry_after_ms };
        }

        log.push_back(now_ms);
        Admission::Allowed
    }

    /// Like `admit`, but does not record `now_ms` on success — used to check
    /// a window without charging it until every other window involved in
    /// the same decision has also cleared (spec §4.6).
    pub fn peek(&self, now_ms: u64) -> Admission {
        let mut log = self.log.lock().unwrap();
        Self::prune(&mut log, now_ms, self.window_ms);

        if (log.len() as u32) >= self.cap {
            let oldest = *log.front().expect("cap > 0 implies a full log is non-empty");
            let retry_after_ms = (oldest + self.window_ms).saturating_sub(now_ms).max(1000);
            return Admission::Denied { retry_after_ms };
        }
        Admission::Allowed
    }

    fn prune(log: &mut VecDeque<u64>, now_ms: u64, window_ms: u64) {
        let cutoff = now_ms.saturating_sub(window_ms);
        while matches!(log.front(), Some(&t) if t < cutoff) {
            log.pop_front();
        }
    }

    /// Drop every timestamp older than `now_ms - window_ms`. Called by the
    /// periodic cleanup task to bound memory for windows that have gone
    /// idle (spec §4.6).
    pub fn cleanup(&self, now_ms: u64) {
        let mut log = self.log.lock().unwrap();
        Self::prune(&mut log, now_ms, self.window_ms);
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}
