use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::TimeSource;

/// Reads `SystemTime::now()` on every call.
///
/// Follows every adjustment of the system clock, including backward steps
/// from NTP or a resumed VM. Generators do not compensate for those; a
/// backward step can reissue `(millisecond, sequence)` pairs already handed
/// out. Prefer [`MonotonicClock`](crate::MonotonicClock) where that matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        // A clock set before 1970 reads as 0, which any later epoch rejects.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |since| since.as_millis() as u64)
    }
}
