//! Transaction ids.
//!
//! A zxid is a 64-bit number: the high 32 bits are the epoch, the low 32
//! bits a counter. Epochs mark a change of leadership; the single-node
//! engine runs in epoch 0 and simply increments the counter per mutation,
//! which already yields the unique, monotonically increasing ids a log
//! needs. A replicated build would bump the epoch on every new leader.

use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zxid(i64);

impl Zxid {
    /// Line the epoch and counter up with the high and low 32 bits.
    pub fn new(
        epoch: i32,
        counter: i32,
    ) -> Self {
        let high_bits = i64::from(epoch) << 32;
        let low_bits = i64::from(counter) & 0xFFFF_FFFF;
        Self(high_bits | low_bits)
    }

    pub fn epoch(self) -> i32 {
        (self.0 >> 32) as i32
    }

    pub fn counter(self) -> i32 {
        (self.0 & 0xFFFF_FFFF) as i32
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for Zxid {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Central allocator handing out the next transaction id.
#[derive(Debug)]
pub struct ZxidGenerator {
    epoch: i32,
    counter: AtomicI32,
}

impl ZxidGenerator {
    pub fn new(epoch: i32) -> Self {
        Self {
            epoch,
            counter: AtomicI32::new(0),
        }
    }

    /// Allocate the next id. The first id of an epoch is (epoch, 1), so a
    /// fresh log (last zxid 0) accepts it.
    pub fn next(&self) -> Zxid {
        let counter = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Zxid::new(self.epoch, counter)
    }
}
