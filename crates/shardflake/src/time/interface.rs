use std::sync::Arc;

/// 2000-01-01 00:00:00 UTC, the default zero point of the time field.
pub const DEFAULT_EPOCH_MILLIS: u64 = 946_684_800_000;

/// Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_MILLIS: u64 = 0;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH_MILLIS: u64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH_MILLIS: u64 = 1_293_840_000_000;

/// A source of wall-clock time.
///
/// Generators read the clock exactly once per ID and subtract the layout's
/// epoch themselves, so implementations report plain milliseconds since
/// 1970-01-01 UTC. Swap in a fixed or stepped source to make generation
/// deterministic in tests.
///
/// # Example
///
/// ```
/// use shardflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_700_000_000_000
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource {
    /// Returns milliseconds since the UNIX epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
