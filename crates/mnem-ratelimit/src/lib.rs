//! Sliding-window-log admission control: a global window shared by every
//! operation plus an independent window per operation name (spec §4.6).

mod limiter;
mod scheduler;
mod window;

pub use limiter::{Denied, RateLimiter};
pub use scheduler::spawn;
