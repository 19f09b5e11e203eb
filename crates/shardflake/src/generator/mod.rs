#[cfg(feature = "atomic")]
mod atomic;
#[cfg(feature = "basic")]
mod basic;
mod interface;
#[cfg(feature = "lock")]
mod lock;
#[cfg(feature = "lock")]
mod mutex;
#[cfg(any(feature = "basic", feature = "lock", feature = "atomic"))]
mod state;
#[cfg(test)]
mod tests;

#[cfg_attr(docsrs, doc(cfg(feature = "atomic")))]
#[cfg(feature = "atomic")]
pub use atomic::*;
#[cfg_attr(docsrs, doc(cfg(feature = "basic")))]
#[cfg(feature = "basic")]
pub use basic::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use lock::*;
#[cfg(feature = "lock")]
pub(crate) use mutex::*;
#[cfg(any(feature = "basic", feature = "lock", feature = "atomic"))]
pub(crate) use state::*;
