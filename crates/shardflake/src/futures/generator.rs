use core::{future::Future, time::Duration};

use super::SleepProvider;
use crate::{Error, IdGenerator, PackedId, Result};

/// How long to wait after the current millisecond ran out of sequence
/// numbers before trying again.
const OVERFLOW_BACKOFF: Duration = Duration::from_millis(1);

/// Extension trait for generating IDs from async code.
///
/// Instead of failing with [`Error::SequenceOverflow`], the returned future
/// waits on `S` until the clock reaches the next millisecond and retries.
/// Every other error resolves the future immediately.
pub trait IdGeneratorAsyncExt {
    /// Returns a future that resolves to the next ID tagged with
    /// `partition`.
    ///
    /// # Errors
    ///
    /// Any error from [`IdGenerator::generate`] except overflow.
    fn try_generate_async<S>(&self, partition: u64) -> impl Future<Output = Result<PackedId>> + Send
    where
        S: SleepProvider;
}

impl<G> IdGeneratorAsyncExt for G
where
    G: IdGenerator + Sync,
{
    fn try_generate_async<S>(&self, partition: u64) -> impl Future<Output = Result<PackedId>> + Send
    where
        S: SleepProvider,
    {
        async move {
            loop {
                match self.generate(partition) {
                    Err(Error::SequenceOverflow { .. }) => S::sleep_for(OVERFLOW_BACKOFF).await,
                    other => return other,
                }
            }
        }
    }
}
