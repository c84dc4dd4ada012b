//! Upload-record encoding for the solved table.
//!
//! Each position becomes one record of three uppercase hex strings: the
//! 32-bit id bit pattern (8 chars), the f32 value bit pattern (8 chars),
//! and the four policy nibbles packed into 16 bits (4 chars, roll 1 in the
//! highest nibble). Records are written as JSON lines in the key-value
//! store's bulk-import shape and round-robined across several files so a
//! failed upload only has to resend one slice.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UrError, UrResult};
use crate::position::GamePosition;
use crate::values::PositionValues;

/// Solved state of one position: value plus best-move policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionNode {
    pub id: i32,
    pub value: f32,
    pub policy: [u8; 4],
}

impl PositionValues {
    /// The export record for a position.
    pub fn solution_node(&self, position: GamePosition) -> SolutionNode {
        SolutionNode {
            id: position.id(),
            value: self.value_of(position),
            policy: self.policy(position),
        }
    }
}

/// A hex-encoded record as persisted by the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbRecord {
    /// Position id as 8 uppercase hex chars.
    pub i: String,
    /// Value bit pattern as 8 uppercase hex chars.
    pub v: String,
    /// Packed policy as 4 uppercase hex chars.
    pub p: String,
}

impl DbRecord {
    pub fn encode(node: &SolutionNode) -> Self {
        let mut packed: u16 = 0;
        for &p in &node.policy {
            packed = (packed << 4) | p as u16;
        }
        DbRecord {
            i: format!("{:08X}", node.id as u32),
            v: format!("{:08X}", node.value.to_bits()),
            p: format!("{:04X}", packed),
        }
    }

    pub fn decode(&self) -> UrResult<SolutionNode> {
        let id = parse_hex(&self.i, 8)? as i32;
        let value = f32::from_bits(parse_hex(&self.v, 8)?);
        let mut packed = parse_hex(&self.p, 4)? as u16;

        let mut policy = [0u8; 4];
        for slot in policy.iter_mut().rev() {
            *slot = (packed & 0xf) as u8;
            packed >>= 4;
        }
        Ok(SolutionNode { id, value, policy })
    }
}

fn parse_hex(text: &str, width: usize) -> UrResult<u32> {
    if text.len() != width {
        return Err(UrError::InvalidRecord(text.to_string()));
    }
    u32::from_str_radix(text, 16).map_err(|_| UrError::InvalidRecord(text.to_string()))
}

// Import line shape expected by the key-value store: field order matters to
// byte-compare generated files, so use derived Serialize on named structs
// rather than an ad-hoc map.
#[derive(Serialize)]
struct ImportAttr<'a> {
    #[serde(rename = "S")]
    s: &'a str,
}

#[derive(Serialize)]
struct ImportItem<'a> {
    #[serde(rename = "I")]
    i: ImportAttr<'a>,
    #[serde(rename = "V")]
    v: ImportAttr<'a>,
    #[serde(rename = "P")]
    p: ImportAttr<'a>,
}

#[derive(Serialize)]
struct ImportLine<'a> {
    #[serde(rename = "Item")]
    item: ImportItem<'a>,
}

/// One JSON line in the bulk-import format.
pub fn import_line(record: &DbRecord) -> UrResult<String> {
    let line = ImportLine {
        item: ImportItem {
            i: ImportAttr { s: &record.i },
            v: ImportAttr { s: &record.v },
            p: ImportAttr { s: &record.p },
        },
    };
    Ok(serde_json::to_string(&line)?)
}

/// Write the whole solution as `urnodes00.json` .. `urnodesNN.json` under
/// `dir`, one import line per position, round-robined across the files.
pub fn export_files(
    values: &PositionValues,
    dir: impl AsRef<Path>,
    file_count: usize,
) -> UrResult<usize> {
    assert!(file_count > 0);
    let dir = dir.as_ref();

    let mut writers: Vec<BufWriter<File>> = (0..file_count)
        .map(|i| {
            let path = dir.join(format!("urnodes{i:02}.json"));
            Ok(BufWriter::new(File::create(path)?))
        })
        .collect::<UrResult<_>>()?;

    let mut count = 0usize;
    let mut result: UrResult<()> = Ok(());
    GamePosition::for_each(|pos| {
        if result.is_err() {
            return;
        }
        result = (|| {
            let record = DbRecord::encode(&values.solution_node(pos));
            let line = import_line(&record)?;
            let writer = &mut writers[count % file_count];
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            Ok(())
        })();
        count += 1;
    });
    result?;

    for mut writer in writers {
        writer.flush()?;
    }
    Ok(count)
}
