//! Sortable 64-bit IDs tagged with a shard partition.
//!
//! An ID packs, from the most significant bit down: a zero sign bit,
//! milliseconds since a configurable epoch, a per-millisecond sequence, a
//! partition tag and an optional 4 bit Luhn mod-16 check nibble. Field widths
//! are chosen once through [`GeneratorConfig`] and validated into a
//! [`BitLayout`]; every generator and decoder works from that layout.
//!
//! ```
//! use shardflake::{GeneratorConfig, IdGenerator, LockIdGenerator, MonotonicClock};
//!
//! let layout = GeneratorConfig::default()
//!     .with_sequence_bits(8)
//!     .with_partition_bits(8)
//!     .with_checksum_bits(0)
//!     .build()
//!     .unwrap();
//! let generator = LockIdGenerator::new(layout, MonotonicClock::default());
//!
//! let id = generator.generate_with(0xBBD3, std::thread::yield_now).unwrap();
//! let parts = id.decode(&layout);
//! assert_eq!(parts.partition, 0xD3);
//! assert_eq!(parts.checksum, None);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod checksum;
mod config;
mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod layout;
#[cfg(feature = "partition")]
mod partition;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::checksum::*;
pub use crate::config::*;
pub use crate::error::*;
#[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::layout::*;
#[cfg_attr(docsrs, doc(cfg(feature = "partition")))]
#[cfg(feature = "partition")]
pub use crate::partition::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
