//! Deterministic row-major grid placement for tabular plant lists.
//!
//! Each input record at position `i` lands at `x = i % width`, `y = i / width`.
//! The result is emitted as `placement.json` (a sequence of mappings) and
//! `layout.csv` (input columns followed by `x`, `y`).
//!
//! The staged pipeline:
//!
//! 1. Validate the grid: [`GridSpec::new`]
//! 2. Read the input: [`load_table`] / [`read_table`]
//! 3. Place: [`GridPlacer::place`]
//! 4. Encode: [`serialize_json`], [`serialize_tabular`]
//! 5. Write: [`EncodedOutputs::write_to`]
//!
//! [`run_layout`] performs all five.

#![forbid(unsafe_code)]

pub mod delimited;
pub mod emit;
pub mod error;
pub mod fonts;
pub mod grid;
pub mod pipeline;
pub mod place;
pub mod plants;
pub mod table;

pub use delimited::{Delimiter, read_table, read_table_bytes};
pub use emit::{EncodedOutputs, LAYOUT_CSV, PLACEMENT_JSON, serialize_json, serialize_tabular};
pub use error::{LayoutError, LayoutResult};
pub use grid::{GridSpec, Placement};
pub use pipeline::{InputFormat, LayoutJob, LayoutOutputs, load_table, prepare, run_layout};
pub use place::{GridPlacer, PlacedRecord, PlacementSet, X_FIELD, Y_FIELD, place};
pub use plants::{PlantInput, plants_to_csv};
pub use table::{Record, Table};
