//! The server-object handle table.
//!
//! One table per session, one slot per logical open. ROPs reference
//! slots by small index, never by raw handle value. Released slots hold
//! the `0xFFFFFFFF` sentinel and are reused by the next allocation; the
//! sentinel itself is never a live handle value.

use crate::error::SessionError;
use oxrops_protocol::rop::RopId;
use oxrops_protocol::UNUSED_HANDLE;

/// How ROPs resolve handle-table indices.
///
/// Some server builds resolve a documented set of ROPs through the logon
/// object instead of the referenced slot and therefore never fail them
/// on an otherwise-invalid index. That behavior is injected per session,
/// not detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandleResolutionPolicy {
    /// Every index must reference a live slot.
    #[default]
    Strict,
    /// The alternate-resolution ROP set falls back to the primary logon
    /// slot when its index does not resolve.
    AlternateLookup,
}

/// Per-session table of server-object handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleTable {
    slots: Vec<u32>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Pre-initializes `n` unused slots, the way request buffers ship a
    /// sentinel-filled table sized for the expected outputs.
    pub fn with_unused_slots(n: usize) -> Self {
        Self {
            slots: vec![UNUSED_HANDLE; n],
        }
    }

    /// Stores a newly created handle, reusing the first released slot or
    /// appending, and returns its index.
    ///
    /// Storing the unused-slot sentinel as a live handle is a caller
    /// contract violation.
    pub fn allocate(&mut self, handle: u32) -> usize {
        assert!(
            handle != UNUSED_HANDLE,
            "the unused-slot sentinel is not an assignable handle"
        );
        if let Some(index) = self.slots.iter().position(|&slot| slot == UNUSED_HANDLE) {
            self.slots[index] = handle;
            index
        } else {
            self.slots.push(handle);
            self.slots.len() - 1
        }
    }

    /// Resolves an index to its handle.
    pub fn resolve(&self, index: usize) -> Result<u32, SessionError> {
        match self.slots.get(index) {
            None => Err(SessionError::InvalidHandleIndex {
                index,
                len: self.slots.len(),
            }),
            Some(&slot) if slot == UNUSED_HANDLE => Err(SessionError::ReleasedHandle { index }),
            Some(&slot) => Ok(slot),
        }
    }

    /// Resolves an index for a specific ROP under the given policy:
    /// the alternate-resolution set falls back to slot 0.
    pub fn resolve_for(
        &self,
        rop: RopId,
        index: usize,
        policy: HandleResolutionPolicy,
    ) -> Result<u32, SessionError> {
        match self.resolve(index) {
            Ok(handle) => Ok(handle),
            Err(err) => {
                if policy == HandleResolutionPolicy::AlternateLookup
                    && rop.uses_alternate_handle_resolution()
                {
                    self.resolve(0)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Replaces the slot with the unused sentinel. Releasing an index
    /// that was never allocated is a no-op.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = UNUSED_HANDLE;
        }
    }

    /// Overwrites a slot, growing the table with unused slots as needed.
    pub fn assign(&mut self, index: usize, handle: u32) {
        assert!(
            handle != UNUSED_HANDLE,
            "the unused-slot sentinel is not an assignable handle"
        );
        if index >= self.slots.len() {
            self.slots.resize(index + 1, UNUSED_HANDLE);
        }
        self.slots[index] = handle;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The raw table, as serialized into the output buffer.
    pub fn as_slice(&self) -> &[u32] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allocate_reuses_released_slots() {
        let mut table = HandleTable::new();
        assert_eq!(table.allocate(0x100), 0);
        assert_eq!(table.allocate(0x101), 1);
        table.release(0);
        // The released slot is reused, never left as a sentinel hole.
        assert_eq!(table.allocate(0x102), 0);
        assert_eq!(table.resolve(0).unwrap(), 0x102);
        assert_eq!(table.resolve(1).unwrap(), 0x101);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let table = HandleTable::new();
        assert_eq!(
            table.resolve(2),
            Err(SessionError::InvalidHandleIndex { index: 2, len: 0 })
        );
    }

    #[test]
    fn test_resolve_released_slot() {
        let mut table = HandleTable::new();
        table.allocate(0x100);
        table.release(0);
        assert_eq!(table.resolve(0), Err(SessionError::ReleasedHandle { index: 0 }));
    }

    #[test]
    #[should_panic(expected = "sentinel")]
    fn test_sentinel_is_never_assignable() {
        let mut table = HandleTable::new();
        table.allocate(UNUSED_HANDLE);
    }

    #[test]
    fn test_with_unused_slots() {
        let table = HandleTable::with_unused_slots(3);
        assert_eq!(table.as_slice(), &[UNUSED_HANDLE; 3]);
        assert!(table.resolve(0).is_err());
    }

    #[test]
    fn test_assign_grows_with_sentinels() {
        let mut table = HandleTable::new();
        table.assign(2, 0x300);
        assert_eq!(table.len(), 3);
        assert_eq!(table.as_slice()[0], UNUSED_HANDLE);
        assert_eq!(table.resolve(2).unwrap(), 0x300);
    }

    #[test]
    fn test_alternate_resolution_falls_back_to_logon_slot() {
        let mut table = HandleTable::new();
        table.allocate(0xAAAA); // primary logon handle at slot 0

        // Strict: a bad index fails regardless of the ROP.
        assert!(table
            .resolve_for(RopId::LongTermIdFromId, 9, HandleResolutionPolicy::Strict)
            .is_err());

        // Alternate lookup: the documented set resolves through slot 0.
        assert_eq!(
            table
                .resolve_for(
                    RopId::LongTermIdFromId,
                    9,
                    HandleResolutionPolicy::AlternateLookup
                )
                .unwrap(),
            0xAAAA
        );

        // ROPs outside the set still fail.
        assert!(table
            .resolve_for(RopId::OpenFolder, 9, HandleResolutionPolicy::AlternateLookup)
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_allocate_never_stores_sentinel(
            handles in proptest::collection::vec(0u32..0xFFFF_FFFE, 1..64),
            release_every in 1usize..5,
        ) {
            let mut table = HandleTable::new();
            for (i, handle) in handles.iter().enumerate() {
                let index = table.allocate(*handle);
                prop_assert_eq!(table.resolve(index).unwrap(), *handle);
                if i % release_every == 0 {
                    table.release(index);
                }
            }
            // Live slots never hold the sentinel by way of allocate.
            for (index, slot) in table.as_slice().iter().enumerate() {
                if *slot != oxrops_protocol::UNUSED_HANDLE {
                    prop_assert!(table.resolve(index).is_ok());
                }
            }
        }
    }
}
