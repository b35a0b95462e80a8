//! Bounded ring of encoded snapshot records.
//!
//! [`RecordRing`] keeps published snapshots as fixed-size wire records
//! ([`Snapshot::to_record`]) laid end to end in one preallocated byte
//! buffer. When every slot is occupied the newest record is rejected with
//! [`PublishError::ChannelFull`], which is the same back-pressure the
//! bounded channel applies: the tick thread never waits and never
//! overwrites a record a consumer has not read yet.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::ConfigError;
use crate::publish::{PublishError, SnapshotSink};
use crate::snapshot::{RecordError, Snapshot, RECORD_LEN};

struct Slots {
    bytes: Box<[u8]>,
    /// Slot holding the oldest unread record.
    head: usize,
    /// Unread records.
    len: usize,
}

impl Slots {
    fn record(&self, slot: usize) -> &[u8] {
        &self.bytes[slot * RECORD_LEN..(slot + 1) * RECORD_LEN]
    }

    fn record_mut(&mut self, slot: usize) -> &mut [u8] {
        &mut self.bytes[slot * RECORD_LEN..(slot + 1) * RECORD_LEN]
    }
}

/// FIFO of up to `capacity` records of [`RECORD_LEN`] bytes each.
///
/// Any thread may produce or consume; all access goes through one mutex
/// that is held only for a single record copy.
pub struct RecordRing {
    slots: Mutex<Slots>,
    capacity: usize,
}

const _: fn() = || {
    fn check<T: Send + Sync>() {}
    check::<RecordRing>();
};

impl RecordRing {
    /// Allocate room for `capacity` records up front.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(Self {
            slots: Mutex::new(Slots {
                bytes: vec![0u8; capacity * RECORD_LEN].into_boxed_slice(),
                head: 0,
                len: 0,
            }),
            capacity,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encode `snapshot` into the next free slot.
    ///
    /// Fails with [`PublishError::ChannelFull`] and leaves the ring
    /// untouched when no slot is free.
    pub fn push(&self, snapshot: &Snapshot) -> Result<(), PublishError> {
        let mut slots = self.lock();
        if slots.len == self.capacity {
            return Err(PublishError::ChannelFull);
        }
        let tail = (slots.head + slots.len) % self.capacity;
        slots.record_mut(tail).copy_from_slice(&snapshot.to_record());
        slots.len += 1;
        Ok(())
    }

    /// Remove the oldest record and return its raw bytes.
    pub fn pop_record(&self) -> Option<Vec<u8>> {
        let mut slots = self.lock();
        if slots.len == 0 {
            return None;
        }
        let head = slots.head;
        let record = slots.record(head).to_vec();
        slots.head = (head + 1) % self.capacity;
        slots.len -= 1;
        Some(record)
    }

    /// Remove and decode the oldest record.
    pub fn pop(&self) -> Option<Result<Snapshot, RecordError>> {
        self.pop_record().map(|r| Snapshot::from_record(&r))
    }

    /// Unread records.
    pub fn len(&self) -> usize {
        self.lock().len
    }

    /// Whether there is nothing to read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of unread records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl SnapshotSink for RecordRing {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        self.push(&snapshot)
    }
}
