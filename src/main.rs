use clap::{Parser, Subcommand, ValueEnum};
use photo_collage::{
    CollageRequest, Composer, DocumentComposer, RasterComposer, config, input, output, plan,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo-collage")]
#[command(about = "Lay out photos in a grid and export the collage as PNG or DOCX")]
#[command(long_about = "\
Lay out photos in a grid and export the collage as PNG or DOCX

The grid is sized from the number of photos (1 → 1x1, 2-4 → 2x2, 5-9 → 3x3,
and so on). Photos fill it row by row in the order given; a photo that cannot
be decoded leaves its cell blank. An optional title is centered above the grid.

  PNG   2480x3508 pixel page (A4 at 300 dpi), bordered cells
  DOCX  8x11 inch page holding a fixed-layout table, one picture per cell

Run 'photo-collage gen-config' to generate a documented collage.toml.")]
#[command(version)]
struct Cli {
    /// TOML file overriding the stock layout settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Docx,
    All,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a collage from image files and directories
    Build {
        /// Image files or directories, in display order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Title shown above the grid and used as the file name
        #[arg(long)]
        title: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "all")]
        format: Format,

        /// Directory the collage files are written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Show the grid chosen for a number of photos
    Plan {
        count: usize,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock collage.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            inputs,
            title,
            format,
            output: output_dir,
        } => {
            let collage_config = config::load_config(cli.config.as_deref())?;
            let paths = input::collect_image_paths(&inputs)?;
            let request = CollageRequest::new(input::read_images(&paths)?, title);
            if request.is_empty() {
                println!("No images found, nothing to build");
                return Ok(());
            }
            std::fs::create_dir_all(&output_dir)?;

            if matches!(format, Format::Png | Format::All) {
                let composer = RasterComposer::new(&collage_config)?;
                build(&composer, &request, &output_dir, &paths)?;
            }
            if matches!(format, Format::Docx | Format::All) {
                let composer = DocumentComposer::new(&collage_config)?;
                build(&composer, &request, &output_dir, &paths)?;
            }
        }
        Command::Plan { count, json } => {
            let grid = plan(count);
            if json {
                let value = serde_json::json!({ "count": count, "plan": grid });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_plan(count, grid);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Compose one artifact, write it, and print its placement report.
fn build(
    composer: &impl Composer,
    request: &CollageRequest,
    output_dir: &Path,
    sources: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = composer.kind();
    let Some(collage) = composer.compose(request)? else {
        return Ok(());
    };
    let path = output_dir.join(&collage.artifact.filename);
    std::fs::write(&path, &collage.artifact.bytes)?;
    info!(
        ?kind,
        path = %path.display(),
        bytes = collage.artifact.bytes.len(),
        "wrote collage"
    );
    output::print_collage(&collage, &path, sources);
    Ok(())
}
