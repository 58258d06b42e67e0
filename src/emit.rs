use std::path::{Path, PathBuf};

use crate::{
    delimited::{self, Delimiter},
    error::{LayoutError, LayoutResult},
    place::PlacementSet,
};

pub const PLACEMENT_JSON: &str = "placement.json";
pub const LAYOUT_CSV: &str = "layout.csv";

/// Compact JSON: a sequence of mappings, input fields first then numeric `x`, `y`.
pub fn serialize_json(placements: &PlacementSet) -> LayoutResult<Vec<u8>> {
    serde_json::to_vec(placements).map_err(|e| LayoutError::serde(e.to_string()))
}

/// Comma-delimited text with a header row, one record per placement.
pub fn serialize_tabular(placements: &PlacementSet) -> Vec<u8> {
    let mut out = String::new();
    delimited::write_record(&mut out, placements.fields(), Delimiter::Comma);
    for row in placements.rows() {
        let x = row.record.placement.x.to_string();
        let y = row.record.placement.y.to_string();
        let fields = row
            .record
            .values
            .iter()
            .map(String::as_str)
            .chain([x.as_str(), y.as_str()]);
        delimited::write_record(&mut out, fields, Delimiter::Comma);
    }
    out.into_bytes()
}

/// Both encodings, produced fully in memory before anything touches disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedOutputs {
    pub placement_json: Vec<u8>,
    pub layout_csv: Vec<u8>,
}

impl EncodedOutputs {
    pub fn encode(placements: &PlacementSet) -> LayoutResult<Self> {
        Ok(Self {
            placement_json: serialize_json(placements)?,
            layout_csv: serialize_tabular(placements),
        })
    }

    /// Create `out_dir` (and parents) then write `placement.json` and `layout.csv`.
    ///
    /// Writes are not transactional: a failure on the second file leaves the
    /// first one in place.
    pub fn write_to(&self, out_dir: &Path) -> LayoutResult<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(out_dir).map_err(|e| LayoutError::output_write(out_dir, e))?;

        let json_path = out_dir.join(PLACEMENT_JSON);
        std::fs::write(&json_path, &self.placement_json)
            .map_err(|e| LayoutError::output_write(&json_path, e))?;

        let csv_path = out_dir.join(LAYOUT_CSV);
        std::fs::write(&csv_path, &self.layout_csv)
            .map_err(|e| LayoutError::output_write(&csv_path, e))?;

        tracing::debug!(
            json = %json_path.display(),
            csv = %csv_path.display(),
            "wrote layout outputs"
        );
        Ok((json_path, csv_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{place::place, table::Table};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn tabular_has_header_then_rows() {
        let t = Table::from_rows(
            s(&["name", "note"]),
            vec![s(&["Basil", "sweet, green"]), s(&["Mint", ""])],
        )
        .unwrap();
        let set = place(&t, 1, 1).unwrap();
        let csv = String::from_utf8(serialize_tabular(&set)).unwrap();
        assert_eq!(
            csv,
            "name,note,x,y\r\nBasil,\"sweet, green\",0,0\r\nMint,,0,1\r\n"
        );
    }

    #[test]
    fn empty_set_encodes_to_empty_sequence_and_header_only() {
        let set = place(&Table::new(s(&["name", "type"])), 4, 4).unwrap();
        let out = EncodedOutputs::encode(&set).unwrap();
        assert_eq!(out.placement_json, b"[]");
        assert_eq!(out.layout_csv, b"name,type,x,y\r\n");
    }

    #[test]
    fn json_keeps_values_as_strings_and_coordinates_as_numbers() {
        let t = Table::from_rows(s(&["height"]), vec![s(&["1.5"])]).unwrap();
        let set = place(&t, 3, 3).unwrap();
        let json = String::from_utf8(serialize_json(&set).unwrap()).unwrap();
        assert_eq!(json, r#"[{"height":"1.5","x":0,"y":0}]"#);
    }

    #[test]
    fn write_to_reports_unwritable_directory() {
        let base = PathBuf::from("target").join("emit_unwritable");
        std::fs::create_dir_all(&base).unwrap();
        let blocker = base.join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let set = place(&Table::new(s(&["name"])), 1, 1).unwrap();
        let out = EncodedOutputs::encode(&set).unwrap();
        let err = out.write_to(&blocker.join("nested")).unwrap_err();
        assert!(matches!(err, LayoutError::OutputWriteFailure { .. }));
        assert!(err.to_string().contains("nested"));
    }
}
