use crate::{BitLayout, Error, Result};

/// The last `(millisecond, sequence)` pair a generator issued.
///
/// Owned by exactly one generator and never handed out. Every generator
/// flavour advances it through [`GeneratorState::advance`], so the sequence
/// rules live here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GeneratorState {
    last_ms: u64,
    last_seq: u64,
}

impl GeneratorState {
    /// No ID issued yet. `u64::MAX` never fits a time field (at most 63
    /// bits), so the first real millisecond always compares unequal.
    pub(crate) const UNSET: Self = Self {
        last_ms: u64::MAX,
        last_seq: 0,
    };

    #[cfg(test)]
    pub(crate) const fn millis(&self) -> u64 {
        self.last_ms
    }

    #[cfg(test)]
    pub(crate) const fn sequence(&self) -> u64 {
        self.last_seq
    }

    /// The state after issuing one more ID at epoch-relative millisecond
    /// `ms`.
    ///
    /// Within the same millisecond the sequence counts up; any other
    /// millisecond, earlier ones included, restarts it at 0. Running past the
    /// sequence field is an error rather than a wrap to 0, which would
    /// repeat the first ID of the millisecond.
    pub(crate) const fn advance(self, ms: u64, layout: &BitLayout) -> Result<Self> {
        let candidate = if ms == self.last_ms {
            self.last_seq + 1
        } else {
            0
        };
        let seq = candidate & layout.sequence().mask();
        if candidate != 0 && seq == 0 {
            return Err(Error::SequenceOverflow { millis: ms });
        }
        Ok(Self {
            last_ms: ms,
            last_seq: seq,
        })
    }

    #[cfg_attr(not(feature = "atomic"), allow(dead_code))]
    /// Packs the state into one word for atomic storage: the millisecond
    /// above `sequence_bits`, the sequence below.
    pub(crate) const fn to_word(self, layout: &BitLayout) -> u64 {
        if self.last_ms == u64::MAX {
            return u64::MAX;
        }
        (self.last_ms << layout.sequence().bits()) | self.last_seq
    }

    #[cfg_attr(not(feature = "atomic"), allow(dead_code))]
    pub(crate) const fn from_word(word: u64, layout: &BitLayout) -> Self {
        if word == u64::MAX {
            return Self::UNSET;
        }
        Self {
            last_ms: word >> layout.sequence().bits(),
            last_seq: word & layout.sequence().mask(),
        }
    }

    /// Packs the issued state plus `partition` into an ID.
    pub(crate) const fn to_id(self, layout: &BitLayout, partition: u64) -> u64 {
        layout.pack(self.last_ms, self.last_seq, partition)
    }
}

/// Epoch-relative milliseconds for the wall-clock reading `now`.
///
/// # Errors
///
/// Fails when `now` predates the epoch or no longer fits the time field.
pub(crate) const fn millis_since_epoch(layout: &BitLayout, now: u64) -> Result<u64> {
    let Some(ms) = now.checked_sub(layout.epoch()) else {
        return Err(Error::ClockBeforeEpoch {
            now,
            epoch: layout.epoch(),
        });
    };
    if ms > layout.max_raw_millis() {
        return Err(Error::TimestampOverflow {
            millis: ms,
            max: layout.max_raw_millis(),
        });
    }
    Ok(ms)
}
