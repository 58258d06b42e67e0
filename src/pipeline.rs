use std::path::{Path, PathBuf};

use crate::{
    delimited::{self, Delimiter},
    emit::EncodedOutputs,
    error::{LayoutError, LayoutResult},
    grid::GridSpec,
    place::{GridPlacer, PlacementSet},
    plants,
    table::Table,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    Csv,
    Tsv,
    PlantsJson,
}

#[derive(Clone, Debug)]
pub struct LayoutJob {
    pub grid: GridSpec,
    pub input: PathBuf,
    pub format: InputFormat,
    pub out_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutOutputs {
    pub placement_json: PathBuf,
    pub layout_csv: PathBuf,
    pub placed: usize,
}

pub fn load_table(path: &Path, format: InputFormat) -> LayoutResult<Table> {
    let data = std::fs::read(path).map_err(|e| LayoutError::input_not_found(path, e))?;
    match format {
        InputFormat::Csv => delimited::read_table_bytes(&data, Delimiter::Comma),
        InputFormat::Tsv => delimited::read_table_bytes(&data, Delimiter::Tab),
        InputFormat::PlantsJson => plants::plants_to_table(&plants::parse_plants_json(&data)?),
    }
}

/// Read, place and encode everything in memory. Nothing is written.
pub fn prepare(job: &LayoutJob) -> LayoutResult<(PlacementSet, EncodedOutputs)> {
    let table = load_table(&job.input, job.format)?;
    tracing::debug!(
        input = %job.input.display(),
        fields = table.header().len(),
        records = table.len(),
        "input loaded"
    );
    let placements = GridPlacer::place(&table, job.grid)?;
    let encoded = EncodedOutputs::encode(&placements)?;
    Ok((placements, encoded))
}

/// Run a complete layout. All validation happens before the output directory is touched.
pub fn run_layout(job: &LayoutJob) -> LayoutResult<LayoutOutputs> {
    let (placements, encoded) = prepare(job)?;
    let (placement_json, layout_csv) = encoded.write_to(&job.out_dir)?;
    Ok(LayoutOutputs {
        placement_json,
        layout_csv,
        placed: placements.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: &str, input: &str, width: i64) -> LayoutJob {
        let dir = PathBuf::from("target").join("pipeline").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let input_path = dir.join("in.csv");
        std::fs::write(&input_path, input).unwrap();
        LayoutJob {
            grid: GridSpec::new(width, 1).unwrap(),
            input: input_path,
            format: InputFormat::Csv,
            out_dir: dir.join("out"),
        }
    }

    #[test]
    fn run_layout_writes_both_files() {
        let j = job("ok", "name\nBasil\nMint\n", 1);
        let out = run_layout(&j).unwrap();
        assert_eq!(out.placed, 2);
        assert_eq!(out.placement_json, j.out_dir.join("placement.json"));
        assert_eq!(
            std::fs::read_to_string(&out.layout_csv).unwrap(),
            "name,x,y\r\nBasil,0,0\r\nMint,0,1\r\n"
        );
    }

    #[test]
    fn failures_leave_output_dir_untouched() {
        let j = job("conflict", "y\n1\n", 2);
        let err = run_layout(&j).unwrap_err();
        assert!(matches!(err, LayoutError::SchemaConflict(_)));
        assert!(!j.out_dir.exists());

        let j = job("ragged", "a,b\n1\n", 2);
        let err = run_layout(&j).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedInput(_)));
        assert!(!j.out_dir.exists());
    }

    #[test]
    fn missing_input_names_the_path() {
        let err = load_table(Path::new("target/pipeline/absent.csv"), InputFormat::Csv).unwrap_err();
        assert!(matches!(err, LayoutError::InputNotFound { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }
}
