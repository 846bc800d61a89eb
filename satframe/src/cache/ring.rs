//! Fixed-capacity ring of cache slot metadata.

use crate::cache::types::{CacheError, Timestamp};

/// Ring of admission metadata driving write-cursor rotation.
///
/// Each slot holds the key of the frame most recently admitted through it,
/// or `None` when the slot is empty. The cursor cycles over the first
/// `display_count` slots so that one full cursor cycle covers exactly one
/// replay window. Slot state only tracks admissions; deleting a blob file
/// does not clear its slot and overwriting a slot does not delete a file.
#[derive(Debug)]
pub struct SlotRing {
    slots: Vec<Option<Timestamp>>,
    cursor: usize,
    display_count: usize,
}

impl SlotRing {
    /// Create a ring with `capacity` slots cycling over `display_count`.
    ///
    /// Rejects a zero `display_count` and a `display_count` larger than
    /// `capacity`; the cursor must be able to complete a cycle without
    /// leaving the slot array.
    pub fn new(capacity: usize, display_count: usize) -> Result<Self, CacheError> {
        if display_count == 0 {
            return Err(CacheError::InvalidConfig(
                "display count must be at least 1".to_string(),
            ));
        }
        if display_count > capacity {
            return Err(CacheError::InvalidConfig(format!(
                "display count {} exceeds cache capacity {}",
                display_count, capacity
            )));
        }

        Ok(Self {
            slots: vec![None; capacity],
            cursor: 0,
            display_count,
        })
    }

    /// Record an admission at the cursor and advance it.
    ///
    /// Returns the key previously occupying the slot, if any. The caller
    /// decides what, if anything, to do about the displaced key; the ring
    /// never touches storage.
    pub fn record(&mut self, key: Timestamp) -> Option<Timestamp> {
        let displaced = self.slots[self.cursor].replace(key);
        self.cursor = (self.cursor + 1) % self.display_count;
        displaced
    }

    /// Clear every slot and reset the cursor to 0.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.cursor = 0;
    }

    /// Whether any slot currently holds `key`.
    pub fn contains(&self, key: &Timestamp) -> bool {
        self.slots.iter().any(|slot| slot.as_ref() == Some(key))
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current write cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u32) -> Timestamp {
        Timestamp::new(format!("20250109-{:04}", n))
    }

    #[test]
    fn test_ring_starts_empty() {
        let ring = SlotRing::new(144, 48).unwrap();

        assert_eq!(ring.capacity(), 144);
        assert_eq!(ring.occupied(), 0);
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn test_ring_rejects_zero_display_count() {
        assert!(matches!(
            SlotRing::new(10, 0),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ring_rejects_display_count_over_capacity() {
        assert!(matches!(
            SlotRing::new(10, 11),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_record_advances_cursor() {
        let mut ring = SlotRing::new(5, 3).unwrap();

        assert_eq!(ring.record(key(1)), None);
        assert_eq!(ring.cursor(), 1);
        assert_eq!(ring.record(key(2)), None);
        assert_eq!(ring.cursor(), 2);
    }

    #[test]
    fn test_cursor_wraps_at_display_count() {
        let mut ring = SlotRing::new(5, 3).unwrap();

        for n in 1..=3 {
            ring.record(key(n));
        }

        // Cursor cycles over display_count slots, not the full capacity.
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.occupied(), 3);
    }

    #[test]
    fn test_wraparound_displaces_oldest_key() {
        let mut ring = SlotRing::new(5, 3).unwrap();

        for n in 1..=3 {
            ring.record(key(n));
        }
        let displaced = ring.record(key(4));

        assert_eq!(displaced, Some(key(1)));
        assert!(!ring.contains(&key(1)));
        assert!(ring.contains(&key(4)));
    }

    #[test]
    fn test_clear_resets_slots_and_cursor() {
        let mut ring = SlotRing::new(5, 3).unwrap();
        ring.record(key(1));
        ring.record(key(2));

        ring.clear();

        assert_eq!(ring.occupied(), 0);
        assert_eq!(ring.cursor(), 0);
        assert!(!ring.contains(&key(1)));
    }

    #[test]
    fn test_display_count_equal_to_capacity() {
        let mut ring = SlotRing::new(3, 3).unwrap();

        for n in 1..=3 {
            ring.record(key(n));
        }

        assert_eq!(ring.occupied(), 3);
        assert_eq!(ring.record(key(4)), Some(key(1)));
    }
}
