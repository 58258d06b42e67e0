use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Assign row-major grid positions to the rows of a CSV file.
#[derive(Parser, Debug)]
#[command(name = "plant-layout", version, allow_negative_numbers = true)]
struct Cli {
    /// Grid width (columns per row). Must be positive.
    width: i64,

    /// Grid height. Recorded only; placements are not bounded by it.
    height: i64,

    /// Input file with a header row.
    input_path: PathBuf,

    /// Output directory for `placement.json` and `layout.csv`. Created if missing.
    #[arg(long = "out")]
    out_dir: PathBuf,

    /// Input encoding.
    #[arg(long, value_enum, default_value_t = InputChoice::Csv)]
    input_format: InputChoice,

    /// Print diagnostics about font setup (path, family, face count).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputChoice {
    Csv,
    Tsv,
    PlantsJson,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    plant_layout::fonts::init_text_rendering();

    let cli = Cli::parse();
    if cli.dump_fonts {
        dump_font_diagnostics();
    }

    let grid = plant_layout::GridSpec::new(cli.width, cli.height)?;
    let format = match cli.input_format {
        InputChoice::Csv => plant_layout::InputFormat::Csv,
        InputChoice::Tsv => plant_layout::InputFormat::Tsv,
        InputChoice::PlantsJson => plant_layout::InputFormat::PlantsJson,
    };

    let job = plant_layout::LayoutJob {
        grid,
        input: cli.input_path,
        format,
        out_dir: cli.out_dir,
    };
    let outputs = plant_layout::run_layout(&job)
        .with_context(|| format!("layout '{}'", job.input.display()))?;

    eprintln!(
        "placed {} records; wrote {} and {}",
        outputs.placed,
        outputs.placement_json.display(),
        outputs.layout_csv.display()
    );
    Ok(())
}

fn dump_font_diagnostics() {
    eprintln!("font diagnostics:");
    match plant_layout::fonts::text_rendering() {
        Some(f) => {
            eprintln!("  font_path:  {}", f.font_path.display());
            eprintln!("  family:     {}", f.family);
            eprintln!("  font_faces: {}", f.face_count);
        }
        None => {
            eprintln!(
                "  font_path:  {} (not loaded)",
                plant_layout::fonts::font_path_from_env().display()
            );
        }
    }
}
