use bytes::{Bytes, BytesMut};

use crate::error::{ConcatError, Result};

/// One slot per input, indexed by the input's original position.
///
/// Slots are filled in whatever order fetches complete; `merge` joins them in index order.
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<Option<Bytes>>,
    filled: usize,
}

impl SlotTable {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            filled: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Writes the content for `index`.  Each slot accepts exactly one write.
    ///
    /// Returns true if this write completed the table.
    pub fn fill(&mut self, index: usize, data: Bytes) -> Result<bool> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| ConcatError::InternalError(format!("Slot index {index} out of range for {count} inputs")))?;

        if slot.is_some() {
            return Err(ConcatError::InternalError(format!("Slot {index} written twice")));
        }

        *slot = Some(data);
        self.filled += 1;
        Ok(self.is_complete())
    }

    /// Total number of bytes across all filled slots.
    fn total_len(&self) -> usize {
        self.slots.iter().flatten().map(Bytes::len).sum()
    }

    /// Concatenates every slot in index order into one contiguous buffer.
    pub fn merge(self) -> Result<Bytes> {
        if !self.is_complete() {
            return Err(ConcatError::InternalError(format!(
                "Merge attempted with {} of {} slots filled",
                self.filled,
                self.slots.len()
            )));
        }

        let total_len = self.total_len();
        let mut merged = BytesMut::with_capacity(total_len);
        for data in self.slots.into_iter().flatten() {
            merged.extend_from_slice(&data);
        }

        debug_assert_eq!(merged.len(), total_len);
        Ok(merged.freeze())
    }
}
