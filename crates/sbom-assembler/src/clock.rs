//! Injectable time and identity source.
//!
//! [`assemble`](crate::assembler::assemble) never reads the wall clock or
//! generates a UUID itself — both come through this trait, so tests get
//! byte-identical documents and production gets real timestamps and random
//! serial numbers.

pub trait Clock {
    /// RFC 3339 timestamp with no UTC offset suffix other than `Z`, matching
    /// `metadata.timestamp` in the donor SBOM.
    fn timestamp(&self) -> String;

    /// The UUID to embed in `serialNumber` as `urn:uuid:{}`.
    fn serial_number(&self) -> String;
}

/// Real wall-clock time and a fresh random UUID per call. Used by `sbom-cli`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    fn serial_number(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Fixed timestamp and UUID, for tests asserting on exact document bytes.
pub struct FixedClock {
    timestamp: String,
    serial_number: String,
}

impl FixedClock {
    pub fn new(timestamp: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            serial_number: serial_number.into(),
        }
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.timestamp.clone()
    }

    fn serial_number(&self) -> String {
        self.serial_number.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_what_it_was_given() {
        let clock = FixedClock::new("2026-01-01T00:00:00Z", "abc-123");
        assert_eq!(clock.timestamp(), "2026-01-01T00:00:00Z");
        assert_eq!(clock.serial_number(), "abc-123");
    }

    #[test]
    fn system_clock_produces_an_rfc3339_utc_timestamp() {
        let timestamp = SystemClock.timestamp();
        assert!(timestamp.ends_with('Z'));
        assert_eq!(timestamp.len(), "2026-07-28T00:00:00Z".len());
    }

    #[test]
    fn system_clock_generates_a_fresh_uuid_per_call() {
        assert_ne!(SystemClock.serial_number(), SystemClock.serial_number());
    }
}
