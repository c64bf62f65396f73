use crate::galois::Rotation;
use crate::keys::{AggregatedKey, RotationKeySet};
use utils::map::Map;

/// Keys aggregated during the current wave, before finalization.
#[derive(Default)]
pub struct KeyAccumulator {
    col_left: Map<usize, AggregatedKey>,
    col_right: Map<usize, AggregatedKey>,
    row: Option<AggregatedKey>,
}

impl KeyAccumulator {
    /// Stores key under rotation, whose amount must already be masked.
    /// Returns the key previously stored under the same rotation.
    pub fn insert(&mut self, rotation: Rotation, key: AggregatedKey) -> Option<AggregatedKey> {
        match rotation {
            Rotation::ColumnLeft(k) => self.col_left.insert(k, key),
            Rotation::ColumnRight(k) => self.col_right.insert(k, key),
            Rotation::Row => self.row.replace(key),
        }
    }

    pub fn len(&self) -> usize {
        self.col_left.len() + self.col_right.len() + self.row.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// mask is applied to the column amounts of later lookups.
    pub fn into_key_set(self, mask: usize) -> RotationKeySet {
        RotationKeySet {
            col_left: self.col_left,
            col_right: self.col_right,
            row: self.row,
            mask,
        }
    }
}
