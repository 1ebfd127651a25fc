use std::{collections::BTreeMap, fs::read_to_string, path::Path};

use serde::{Deserialize, Deserializer};

use crate::{Error, FiniteFloat, Ordinal, Vec3};

/// The switch layout of a split keyboard, one independently laid out half
/// per side.
#[derive(Clone, Deserialize)]
pub struct KeyboardLayout {
    /// The left half.
    pub left: HalfLayout,
    /// The right half.
    pub right: HalfLayout,
}

impl KeyboardLayout {
    /// Loads a keyboard layout from the TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file could not be opened or parsed.
    pub fn try_from_path(path: &Path) -> Result<Self, Error> {
        Ok(toml::from_str(&read_to_string(path)?)?)
    }
}

/// The switch layout of a single keyboard half.
#[derive(Clone, Deserialize)]
pub struct HalfLayout {
    /// The physical switch anchors in slot order. The position of an anchor
    /// in this sequence is its slot index.
    #[serde(rename = "mx")]
    pub anchors: Vec<Vec3<FiniteFloat>>,
    /// The row templates keyed by row name.
    #[serde(default)]
    pub rows: BTreeMap<String, RowTemplate>,
}

/// A named keycap shape shared by multiple key positions.
#[derive(Clone, Deserialize)]
pub struct RowTemplate {
    /// The number of keycap instances using this template.
    pub length: usize,
    /// The keycap ordinal for every slot index, `None` where the slot does
    /// not use this template.
    #[serde(rename = "matrix", deserialize_with = "slots_from_matrix")]
    pub slots: Vec<Option<Ordinal>>,
}

impl RowTemplate {
    /// Returns the ordinal assigned to the given slot index, if any.
    #[must_use]
    pub fn ordinal_at(&self, slot: usize) -> Option<Ordinal> {
        self.slots.get(slot).copied().flatten()
    }
}

/// Decodes a `matrix` array from the interchange encoding, where 0 marks a
/// slot without a keycap, into optioned ordinals.
fn slots_from_matrix<'de, D>(deserializer: D) -> Result<Vec<Option<Ordinal>>, D::Error>
where
    D: Deserializer<'de>,
{
    let matrix = Vec::<u32>::deserialize(deserializer)?;

    Ok(matrix.into_iter().map(Ordinal::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_zero_decodes_to_absent_ordinal() {
        let half: HalfLayout = toml::from_str(
            r"
            mx = [
              { x = 0.0, y = 0.0, z = 0.0 },
              { x = 1.0, y = 0.0, z = 0.0 },
              { x = 2.0, y = 0.0, z = 0.0 },
            ]

            [rows.r1]
            length = 2
            matrix = [0, 2, 1]
            ",
        )
        .expect("layout should deserialize");

        let row = &half.rows["r1"];
        assert_eq!(row.length, 2);
        assert_eq!(row.ordinal_at(0), None);
        assert_eq!(row.ordinal_at(1), Ordinal::new(2));
        assert_eq!(row.ordinal_at(2), Ordinal::new(1));
        assert_eq!(row.ordinal_at(3), None);
    }

    #[test]
    fn half_without_rows_deserializes() {
        let half: HalfLayout = toml::from_str("mx = [{ x = 0.5, y = 0.0, z = -0.5 }]")
            .expect("layout should deserialize");

        assert_eq!(half.anchors.len(), 1);
        assert!(half.rows.is_empty());
    }
}
