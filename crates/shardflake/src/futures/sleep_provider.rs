use core::{future::Future, time::Duration};

/// Abstracts over how an async task waits for a given [`Duration`].
///
/// Keeps the async generator extensions independent of any one runtime.
pub trait SleepProvider {
    /// The future must be `Send` so generator futures can move across worker
    /// threads.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
