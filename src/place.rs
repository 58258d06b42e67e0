use crate::{
    error::{LayoutError, LayoutResult},
    grid::{GridSpec, Placement},
    table::Table,
};

/// Column names appended after the input fields. Consumed by external layout tools.
pub const X_FIELD: &str = "x";
pub const Y_FIELD: &str = "y";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedRecord {
    pub values: Vec<String>, // input fields, header order
    pub placement: Placement,
}

/// Placed records in input order plus the full output field order
/// (input header followed by `x`, `y`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSet {
    fields: Vec<String>,
    records: Vec<PlacedRecord>,
}

impl PlacementSet {
    /// Output field order: input header, then `x`, `y`.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The input header only.
    pub fn source_fields(&self) -> &[String] {
        &self.fields[..self.fields.len() - 2]
    }

    pub fn records(&self) -> &[PlacedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = PlacedRow<'_>> {
        let source = self.source_fields();
        self.records.iter().map(move |record| PlacedRow {
            fields: source,
            record,
        })
    }
}

/// Borrowed view pairing a placed record with its field names.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlacedRow<'a> {
    pub fields: &'a [String],
    pub record: &'a PlacedRecord,
}

impl serde::Serialize for PlacedRow<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap as _;

        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (name, value) in self.fields.iter().zip(&self.record.values) {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(X_FIELD, &self.record.placement.x)?;
        map.serialize_entry(Y_FIELD, &self.record.placement.y)?;
        map.end()
    }
}

impl serde::Serialize for PlacementSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

pub struct GridPlacer;

impl GridPlacer {
    /// Assign `x = i % width`, `y = i / width` to each record in input order.
    ///
    /// The grid height is never used to reject or wrap records; placements past
    /// the last declared row only produce a warning.
    #[tracing::instrument(skip(table), fields(records = table.len()))]
    pub fn place(table: &Table, grid: GridSpec) -> LayoutResult<PlacementSet> {
        check_schema(table)?;

        let records: Vec<PlacedRecord> = table
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| PlacedRecord {
                values: record.values().to_vec(),
                placement: grid.placement_for(i as u64),
            })
            .collect();

        let rows = grid.rows_for(records.len() as u64);
        if grid.exceeds_height(rows) {
            tracing::warn!(
                rows,
                height = grid.height(),
                "placements extend past the declared grid height"
            );
        }

        let mut fields = table.header().to_vec();
        fields.push(X_FIELD.to_string());
        fields.push(Y_FIELD.to_string());

        tracing::debug!(placed = records.len(), rows, "placement complete");
        Ok(PlacementSet { fields, records })
    }
}

/// Convenience wrapper validating `width`/`height` before placing.
pub fn place(table: &Table, width: i64, height: i64) -> LayoutResult<PlacementSet> {
    let grid = GridSpec::new(width, height)?;
    GridPlacer::place(table, grid)
}

fn check_schema(table: &Table) -> LayoutResult<()> {
    for reserved in [X_FIELD, Y_FIELD] {
        if table.header().iter().any(|h| h == reserved) {
            return Err(LayoutError::schema_conflict(format!(
                "field name '{reserved}' conflicts with generated column"
            )));
        }
    }
    if let Some(dup) = table.duplicate_field() {
        return Err(LayoutError::schema_conflict(format!(
            "field name '{dup}' appears more than once in the header"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn herbs() -> Table {
        Table::from_rows(
            s(&["name", "type"]),
            vec![
                s(&["Basil", "Herb"]),
                s(&["Mint", "Herb"]),
                s(&["Rose", "Flower"]),
            ],
        )
        .unwrap()
    }

    fn numbered(n: usize) -> Table {
        let rows = (0..n).map(|i| vec![i.to_string()]).collect();
        Table::from_rows(s(&["id"]), rows).unwrap()
    }

    #[test]
    fn places_row_major_in_input_order() {
        let set = place(&herbs(), 2, 10).unwrap();
        let got: Vec<(&str, u64, u64)> = set
            .records()
            .iter()
            .map(|r| (r.values[0].as_str(), r.placement.x, r.placement.y))
            .collect();
        assert_eq!(
            got,
            vec![("Basil", 0, 0), ("Mint", 1, 0), ("Rose", 0, 1)]
        );
        assert_eq!(set.fields(), ["name", "type", "x", "y"]);
        assert_eq!(set.source_fields(), ["name", "type"]);
    }

    #[test]
    fn height_does_not_bound_placement() {
        let set = place(&herbs(), 1, 1).unwrap();
        assert_eq!(set.records()[2].placement, Placement { x: 0, y: 2 });
    }

    #[test]
    fn overflowing_declared_height_keeps_row_major_placement() {
        let t = numbered(7);
        let grid = GridSpec::new(2, 2).unwrap();
        assert!(grid.exceeds_height(grid.rows_for(t.len() as u64)));

        let set = GridPlacer::place(&t, grid).unwrap();
        assert_eq!(set.len(), 7);
        for (i, r) in set.records().iter().enumerate() {
            assert_eq!(r.placement, grid.placement_for(i as u64));
        }
        assert_eq!(set.records()[6].placement, Placement { x: 0, y: 3 });
    }

    #[test]
    fn empty_table_places_nothing() {
        let set = place(&Table::new(s(&["name"])), 3, 3).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.fields(), ["name", "x", "y"]);
    }

    #[test]
    fn non_positive_width_is_invalid_configuration() {
        let err = place(&herbs(), 0, 10).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfiguration(_)));
        let err = place(&Table::new(s(&["name"])), -3, 10).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfiguration(_)));
    }

    #[test]
    fn reserved_field_names_conflict() {
        for (header, name) in [(["name", "x"], "x"), (["y", "name"], "y")] {
            let t = Table::new(s(&header));
            let err = place(&t, 2, 2).unwrap_err();
            assert!(matches!(err, LayoutError::SchemaConflict(_)));
            assert!(
                err.to_string()
                    .contains(&format!("field name '{name}' conflicts with generated column"))
            );
        }
    }

    #[test]
    fn reserved_names_are_case_sensitive() {
        let t = Table::new(s(&["X", "Y"]));
        assert!(place(&t, 2, 2).is_ok());
    }

    #[test]
    fn duplicate_header_fields_conflict() {
        let t = Table::new(s(&["name", "name"]));
        let err = place(&t, 2, 2).unwrap_err();
        assert!(matches!(err, LayoutError::SchemaConflict(_)));
    }

    #[test]
    fn serializes_as_sequence_of_ordered_maps() {
        let set = place(&herbs(), 2, 10).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Basil","type":"Herb","x":0,"y":0},{"name":"Mint","type":"Herb","x":1,"y":0},{"name":"Rose","type":"Flower","x":0,"y":1}]"#
        );
    }
}
