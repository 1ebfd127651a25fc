use std::collections::BTreeMap;

use config::HalfLayout;

/// A consistency error in the layout data of one keyboard half.
///
/// Resolution is deliberately permissive and never performs these checks;
/// they exist for tests and tooling.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutConsistencyError {
    /// A slot maps to an ordinal outside the row's batch.
    #[error("row `{row}`: slot {slot} maps to ordinal {ordinal} outside the batch of length {length}")]
    OrdinalOutOfRange {
        /// The name of the offending row.
        row: String,
        /// The slot index carrying the ordinal.
        slot: usize,
        /// The 1-based ordinal value.
        ordinal: u32,
        /// The length of the row's batch.
        length: usize,
    },
    /// Two slots within a row map to the same ordinal.
    #[error("row `{row}`: slots {first} and {second} both map to ordinal {ordinal}")]
    DuplicateOrdinal {
        /// The name of the offending row.
        row: String,
        /// The 1-based ordinal value.
        ordinal: u32,
        /// The first slot index mapping to the ordinal.
        first: usize,
        /// The second slot index mapping to the ordinal.
        second: usize,
    },
    /// A slot is claimed by more than one row.
    #[error("slot {slot} is claimed by both row `{first}` and row `{second}`")]
    SlotClaimedTwice {
        /// The slot index claimed twice.
        slot: usize,
        /// The name of the first claiming row.
        first: String,
        /// The name of the second claiming row.
        second: String,
    },
    /// A slot map references an anchor that does not exist.
    #[error("row `{row}` maps slot {slot} but only {anchors} anchors exist")]
    UnknownSlot {
        /// The name of the offending row.
        row: String,
        /// The slot index without an anchor.
        slot: usize,
        /// The number of anchors in the half.
        anchors: usize,
    },
}

/// Checks the layout data of one keyboard half for consistency.
///
/// Returns every error found; an empty result means the data is consistent.
#[must_use]
pub fn check_consistency(half: &HalfLayout) -> Vec<LayoutConsistencyError> {
    let mut errors = Vec::new();
    let mut claimed: BTreeMap<usize, &str> = BTreeMap::new();

    for (name, row) in &half.rows {
        let mut seen: BTreeMap<u32, usize> = BTreeMap::new();

        for (slot, ordinal) in row.slots.iter().enumerate() {
            let Some(ordinal) = ordinal else {
                continue;
            };

            if slot >= half.anchors.len() {
                errors.push(LayoutConsistencyError::UnknownSlot {
                    row: name.clone(),
                    slot,
                    anchors: half.anchors.len(),
                });
            }
            if ordinal.index() >= row.length {
                errors.push(LayoutConsistencyError::OrdinalOutOfRange {
                    row: name.clone(),
                    slot,
                    ordinal: ordinal.get(),
                    length: row.length,
                });
            }
            if let Some(&first) = seen.get(&ordinal.get()) {
                errors.push(LayoutConsistencyError::DuplicateOrdinal {
                    row: name.clone(),
                    ordinal: ordinal.get(),
                    first,
                    second: slot,
                });
            } else {
                seen.insert(ordinal.get(), slot);
            }
            if let Some(&first) = claimed.get(&slot) {
                errors.push(LayoutConsistencyError::SlotClaimedTwice {
                    slot,
                    first: first.to_owned(),
                    second: name.clone(),
                });
            } else {
                claimed.insert(slot, name);
            }
        }
    }

    errors
}
