use core::future::Future;

use crate::{
    IdGenerator, PackedId, Result,
    futures::{IdGeneratorAsyncExt, TokioSleep},
};

/// Extension trait for generating IDs on the [`tokio`](https://docs.rs/tokio)
/// runtime.
///
/// Same as [`IdGeneratorAsyncExt`] with [`TokioSleep`] as the sleep provider,
/// so callers need not name one.
pub trait IdGeneratorAsyncTokioExt {
    /// Returns a future that resolves to the next ID tagged with `partition`,
    /// sleeping on Tokio's timer whenever the current millisecond is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Any error from [`IdGenerator::generate`] except overflow.
    fn try_generate_async(&self, partition: u64) -> impl Future<Output = Result<PackedId>> + Send;
}

impl<G> IdGeneratorAsyncTokioExt for G
where
    G: IdGenerator + Sync,
{
    fn try_generate_async(&self, partition: u64) -> impl Future<Output = Result<PackedId>> + Send {
        <Self as IdGeneratorAsyncExt>::try_generate_async::<TokioSleep>(self, partition)
    }
}
