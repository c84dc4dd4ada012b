//! The solved artifact: one win probability per position id, sorted by id.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{UrError, UrResult};
use crate::position::GamePosition;

/// Solved value of a single position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionValue {
    pub id: i32,
    pub value: f32,
}

/// Immutable sorted array of solved values, looked up by binary search.
pub struct PositionValues {
    entries: Vec<PositionValue>,
}

impl PositionValues {
    /// Wrap a sorted entry list produced by the solver.
    pub fn new(entries: Vec<PositionValue>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].id < w[1].id));
        PositionValues { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PositionValue] {
        &self.entries
    }

    /// Win probability for the side to move. The id space is exhaustive,
    /// so a lookup miss is an invariant violation.
    pub fn value_of(&self, position: GamePosition) -> f32 {
        let id = position.id();
        let index = self
            .entries
            .binary_search_by_key(&id, |e| e.id)
            .unwrap_or_else(|_| panic!("position id {id} missing from solution"));
        self.entries[index].value
    }

    pub fn get(&self, id: i32) -> Option<f32> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| self.entries[i].value)
    }

    /// Write the artifact as little-endian (i32 id, f32 value) records.
    pub fn save(&self, path: impl AsRef<Path>) -> UrResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for entry in &self.entries {
            writer.write_all(&entry.id.to_le_bytes())?;
            writer.write_all(&entry.value.to_le_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read an artifact written by [`PositionValues::save`].
    pub fn load(path: impl AsRef<Path>) -> UrResult<Self> {
        let mut reader = BufReader::new(File::open(&path)?);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        if bytes.len() % 8 != 0 {
            return Err(UrError::InvalidSolutionFile(format!(
                "file size {} is not a multiple of the record size",
                bytes.len()
            )));
        }

        let entries: Vec<PositionValue> = bytes
            .chunks_exact(8)
            .map(|rec| PositionValue {
                id: i32::from_le_bytes(rec[0..4].try_into().unwrap()),
                value: f32::from_le_bytes(rec[4..8].try_into().unwrap()),
            })
            .collect();

        if !entries.windows(2).all(|w| w[0].id < w[1].id) {
            return Err(UrError::InvalidSolutionFile(
                "records are not sorted by id".into(),
            ));
        }
        Ok(PositionValues { entries })
    }
}
