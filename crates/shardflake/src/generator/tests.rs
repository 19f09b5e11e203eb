use std::{cell::Cell, collections::HashSet, rc::Rc, sync::Mutex, thread::scope};

#[cfg(feature = "atomic")]
use crate::AtomicIdGenerator;
#[cfg(feature = "basic")]
use crate::BasicIdGenerator;
#[cfg(feature = "lock")]
use crate::LockIdGenerator;
use crate::{
    BitLayout, DEFAULT_EPOCH_MILLIS, Error, GeneratorConfig, IdGenerator, MonotonicClock,
    PackedId, TimeSource, verify_checksum,
};

const T42: u64 = DEFAULT_EPOCH_MILLIS + 42;

#[derive(Clone, Copy)]
struct MockTime {
    millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl SharedMockStepTime {
    fn new(values: Vec<u64>) -> Self {
        Self {
            clock: Rc::new(MockStepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }

    fn step(&self) {
        self.clock.index.set(self.clock.index.get() + 1);
    }
}

impl TimeSource for SharedMockStepTime {
    fn current_millis(&self) -> u64 {
        self.clock.values[self.clock.index.get()]
    }
}

struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

fn layout(sequence_bits: u8, partition_bits: u8, checksum_bits: u8) -> BitLayout {
    GeneratorConfig::default()
        .with_sequence_bits(sequence_bits)
        .with_partition_bits(partition_bits)
        .with_checksum_bits(checksum_bits)
        .build()
        .unwrap()
}

fn sequence_of<G: IdGenerator>(generator: &G, id: PackedId) -> u64 {
    generator.layout().extract_sequence(id.to_raw())
}

fn raw_millis_of<G: IdGenerator>(generator: &G, id: PackedId) -> u64 {
    generator.layout().extract_raw_millis(id.to_raw())
}

fn run_sequence_increments_within_same_millisecond<G>(make: impl Fn(BitLayout, MockTime) -> G)
where
    G: IdGenerator,
{
    let generator = make(layout(8, 8, 0), MockTime { millis: T42 });
    let id1 = generator.generate(0xBBD3).unwrap();
    let id2 = generator.generate(0xBBD3).unwrap();
    let id3 = generator.generate(0xBBD3).unwrap();

    let layout = generator.layout();
    for id in [id1, id2, id3] {
        assert_eq!(layout.extract_millis(id.to_raw()), T42);
        assert_eq!(layout.extract_partition(id.to_raw()), 0xD3);
    }
    assert_eq!(sequence_of(&generator, id1), 0);
    assert_eq!(sequence_of(&generator, id2), 1);
    assert_eq!(sequence_of(&generator, id3), 2);
    assert!(id1 < id2 && id2 < id3);
}

fn run_overflow_is_rejected<G>(make: impl Fn(BitLayout, SharedMockStepTime) -> G)
where
    G: IdGenerator,
{
    let time = SharedMockStepTime::new(vec![T42, T42 + 1]);
    let generator = make(layout(2, 6, 4), time.clone());

    for expected in 0..4 {
        let id = generator.generate(1).unwrap();
        assert_eq!(sequence_of(&generator, id), expected);
    }

    // The fifth ID in one millisecond does not fit two sequence bits, and a
    // rejected call leaves the state where it was.
    for _ in 0..2 {
        assert_eq!(
            generator.generate(1),
            Err(Error::SequenceOverflow { millis: 42 })
        );
    }

    time.step();
    let id = generator.generate(1).unwrap();
    assert_eq!(raw_millis_of(&generator, id), 43);
    assert_eq!(sequence_of(&generator, id), 0);
}

fn run_first_id_at_epoch_has_sequence_zero<G>(make: impl Fn(BitLayout, MockTime) -> G)
where
    G: IdGenerator,
{
    let generator = make(
        BitLayout::default(),
        MockTime {
            millis: DEFAULT_EPOCH_MILLIS,
        },
    );
    let id = generator.generate(0).unwrap();
    assert_eq!(raw_millis_of(&generator, id), 0);
    assert_eq!(sequence_of(&generator, id), 0);
    assert_eq!(sequence_of(&generator, generator.generate(0).unwrap()), 1);
}

fn run_clock_outside_time_field_is_an_error<G>(make: impl Fn(BitLayout, MockTime) -> G)
where
    G: IdGenerator,
{
    let early = make(BitLayout::default(), MockTime { millis: 5 });
    assert_eq!(
        early.generate(0),
        Err(Error::ClockBeforeEpoch {
            now: 5,
            epoch: DEFAULT_EPOCH_MILLIS
        })
    );

    let narrow = GeneratorConfig::default()
        .with_time_bits(8)
        .build()
        .unwrap();
    let late = make(
        narrow,
        MockTime {
            millis: DEFAULT_EPOCH_MILLIS + 256,
        },
    );
    assert_eq!(
        late.generate(0),
        Err(Error::TimestampOverflow {
            millis: 256,
            max: 255
        })
    );
}

fn run_generate_with_waits_out_overflow<G>(make: impl Fn(BitLayout, SharedMockStepTime) -> G)
where
    G: IdGenerator,
{
    let time = SharedMockStepTime::new(vec![T42, T42, T42 + 1]);
    let generator = make(layout(0, 6, 0), time.clone());

    let first = generator.generate(9).unwrap();
    assert_eq!(raw_millis_of(&generator, first), 42);

    let mut backoffs = 0;
    let second = generator
        .generate_with(9, || {
            backoffs += 1;
            time.step();
        })
        .unwrap();

    assert_eq!(backoffs, 2);
    assert_eq!(raw_millis_of(&generator, second), 43);
    assert_eq!(sequence_of(&generator, second), 0);
    assert!(first < second);
}

fn run_generate_with_returns_other_errors<G>(make: impl Fn(BitLayout, MockTime) -> G)
where
    G: IdGenerator,
{
    let generator = make(BitLayout::default(), MockTime { millis: 0 });
    let result = generator.generate_with(0, || panic!("must not back off"));
    assert!(matches!(result, Err(Error::ClockBeforeEpoch { .. })));
}

fn run_backward_clock_restarts_sequence<G>(make: impl Fn(BitLayout, SharedMockStepTime) -> G)
where
    G: IdGenerator,
{
    // Backward steps are not compensated: the earlier millisecond starts a
    // fresh sequence.
    let time = SharedMockStepTime::new(vec![T42 + 1, T42]);
    let generator = make(BitLayout::default(), time.clone());
    generator.generate(0).unwrap();
    generator.generate(0).unwrap();

    time.step();
    let id = generator.generate(0).unwrap();
    assert_eq!(raw_millis_of(&generator, id), 42);
    assert_eq!(sequence_of(&generator, id), 0);
}

fn run_ids_carry_valid_checksums<G>(make: impl Fn(BitLayout, MonotonicClock) -> G)
where
    G: IdGenerator,
{
    let generator = make(BitLayout::default(), MonotonicClock::new());
    for partition in 0..1_000_u64 {
        let id = generator
            .generate_with(partition, core::hint::spin_loop)
            .unwrap();
        assert!(verify_checksum(id.to_raw()), "bad checksum on {id:?}");
        assert_eq!(
            generator.layout().extract_partition(id.to_raw()),
            partition & 0x3F
        );
    }
}

fn run_generator_monotonic<G>(make: impl Fn(BitLayout, MonotonicClock) -> G)
where
    G: IdGenerator,
{
    const TOTAL_IDS: usize = 64 * 256;

    let generator = make(BitLayout::default(), MonotonicClock::new());
    let mut last: Option<PackedId> = None;
    let mut expected_sequence = 0;

    for _ in 0..TOTAL_IDS {
        let id = generator.generate_with(1, core::hint::spin_loop).unwrap();
        if let Some(prev) = last {
            assert!(id > prev);
            if raw_millis_of(&generator, id) > raw_millis_of(&generator, prev) {
                expected_sequence = 0;
            }
        }
        assert_eq!(sequence_of(&generator, id), expected_sequence);
        expected_sequence += 1;
        last = Some(id);
    }
}

fn run_generator_threaded_unique<G>(make: impl Fn(BitLayout, MonotonicClock) -> G)
where
    G: IdGenerator + Sync,
{
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 2_048;
    const TOTAL_IDS: usize = THREADS * IDS_PER_THREAD;

    let generator = make(BitLayout::default(), MonotonicClock::new());
    let seen_ids = Mutex::new(HashSet::with_capacity(TOTAL_IDS));

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let mut local = Vec::with_capacity(IDS_PER_THREAD);
                for _ in 0..IDS_PER_THREAD {
                    local.push(generator.generate_with(7, std::thread::yield_now).unwrap());
                }
                let mut seen = seen_ids.lock().unwrap();
                for id in local {
                    assert!(seen.insert(id), "duplicate {id:?}");
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, TOTAL_IDS, "Expected {TOTAL_IDS} unique IDs");
}

#[cfg(feature = "lock")]
mod lock {
    use super::*;

    #[test]
    fn sequence_increments() {
        run_sequence_increments_within_same_millisecond(LockIdGenerator::new);
    }

    #[test]
    fn overflow_is_rejected() {
        run_overflow_is_rejected(LockIdGenerator::new);
    }

    #[test]
    fn first_id_at_epoch() {
        run_first_id_at_epoch_has_sequence_zero(LockIdGenerator::new);
    }

    #[test]
    fn clock_errors() {
        run_clock_outside_time_field_is_an_error(LockIdGenerator::new);
    }

    #[test]
    fn generate_with_waits() {
        run_generate_with_waits_out_overflow(LockIdGenerator::new);
    }

    #[test]
    fn generate_with_other_errors() {
        run_generate_with_returns_other_errors(LockIdGenerator::new);
    }

    #[test]
    fn backward_clock() {
        run_backward_clock_restarts_sequence(LockIdGenerator::new);
    }

    #[test]
    fn checksums() {
        run_ids_carry_valid_checksums(LockIdGenerator::new);
    }

    #[test]
    fn monotonic() {
        run_generator_monotonic(LockIdGenerator::new);
    }

    #[test]
    fn threaded_unique() {
        run_generator_threaded_unique(LockIdGenerator::new);
    }

    #[test]
    fn clones_share_state() {
        let generator = LockIdGenerator::new(layout(8, 8, 0), MockTime { millis: T42 });
        let handle = generator.clone();
        let a = generator.generate(0).unwrap();
        let b = handle.generate(0).unwrap();
        assert_eq!(sequence_of(&generator, a), 0);
        assert_eq!(sequence_of(&handle, b), 1);
    }
}

#[cfg(feature = "atomic")]
mod atomic {
    use super::*;

    #[test]
    fn sequence_increments() {
        run_sequence_increments_within_same_millisecond(AtomicIdGenerator::new);
    }

    #[test]
    fn overflow_is_rejected() {
        run_overflow_is_rejected(AtomicIdGenerator::new);
    }

    #[test]
    fn first_id_at_epoch() {
        run_first_id_at_epoch_has_sequence_zero(AtomicIdGenerator::new);
    }

    #[test]
    fn clock_errors() {
        run_clock_outside_time_field_is_an_error(AtomicIdGenerator::new);
    }

    #[test]
    fn generate_with_waits() {
        run_generate_with_waits_out_overflow(AtomicIdGenerator::new);
    }

    #[test]
    fn generate_with_other_errors() {
        run_generate_with_returns_other_errors(AtomicIdGenerator::new);
    }

    #[test]
    fn backward_clock() {
        run_backward_clock_restarts_sequence(AtomicIdGenerator::new);
    }

    #[test]
    fn checksums() {
        run_ids_carry_valid_checksums(AtomicIdGenerator::new);
    }

    #[test]
    fn monotonic() {
        run_generator_monotonic(AtomicIdGenerator::new);
    }

    #[test]
    fn threaded_unique() {
        run_generator_threaded_unique(AtomicIdGenerator::new);
    }
}

#[cfg(feature = "basic")]
mod basic {
    use super::*;

    #[test]
    fn sequence_increments() {
        run_sequence_increments_within_same_millisecond(BasicIdGenerator::new);
    }

    #[test]
    fn overflow_is_rejected() {
        run_overflow_is_rejected(BasicIdGenerator::new);
    }

    #[test]
    fn first_id_at_epoch() {
        run_first_id_at_epoch_has_sequence_zero(BasicIdGenerator::new);
    }

    #[test]
    fn clock_errors() {
        run_clock_outside_time_field_is_an_error(BasicIdGenerator::new);
    }

    #[test]
    fn generate_with_waits() {
        run_generate_with_waits_out_overflow(BasicIdGenerator::new);
    }

    #[test]
    fn generate_with_other_errors() {
        run_generate_with_returns_other_errors(BasicIdGenerator::new);
    }

    #[test]
    fn backward_clock() {
        run_backward_clock_restarts_sequence(BasicIdGenerator::new);
    }

    #[test]
    fn checksums() {
        run_ids_carry_valid_checksums(BasicIdGenerator::new);
    }

    #[test]
    fn monotonic() {
        run_generator_monotonic(BasicIdGenerator::new);
    }
}

#[cfg(all(feature = "lock", feature = "partition"))]
#[test]
fn reference_vectors() {
    use crate::make_partition;

    let partition = u64::from(make_partition("test"));
    assert_eq!(partition, 0xBBD3);

    let generator = LockIdGenerator::new(layout(8, 8, 0), MockTime { millis: T42 });
    let first = generator.generate(partition).unwrap();
    let second = generator.generate(partition).unwrap();
    let narrow = generator.layout();
    assert_eq!(narrow.extract_sequence(first.to_raw()), 0x00);
    assert_eq!(narrow.extract_partition(first.to_raw()), 0xD3);
    assert_eq!(narrow.extract_sequence(second.to_raw()), 0x01);

    let generator = LockIdGenerator::new(layout(6, 6, 4), MockTime { millis: T42 });
    let id = generator.generate(partition).unwrap();
    assert_eq!(generator.layout().extract_partition(id.to_raw()), 0x13);
    assert!(id.has_valid_checksum());
}
