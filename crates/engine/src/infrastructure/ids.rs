//! Identifier generators.

use uuid::Uuid;

use crate::infrastructure::ports::UuidPort;

/// Random v4 uuids.
pub struct SystemUuids;

impl SystemUuids {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemUuids {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidPort for SystemUuids {
    fn new_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Sequential uuids for testing: 00000000-0000-0000-0000-000000000001, ...2, ...
#[cfg(test)]
pub struct SequentialUuids {
    next: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl SequentialUuids {
    pub fn new() -> Self {
        Self {
            next: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[cfg(test)]
impl UuidPort for SequentialUuids {
    fn new_uuid(&self) -> Uuid {
        let n = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Uuid::from_u128(u128::from(n))
    }
}
