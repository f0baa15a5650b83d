use clap::{Parser, Subcommand};
use cli::{ExtractionArgs, JobConfig, extract_sketch, write_paths};
use color_eyre::eyre::Result;
use krl::{Clarifications, GenerationRequest, Interpretation, MotionSpec, StartPosition};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Turn sketches into KUKA KRL programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and simplify the paths in a sketch
    Extract {
        /// Sketch image (PNG or JPEG)
        #[arg(short, long)]
        image: PathBuf,
        /// Write the paths as JSON for a later `generate --paths`
        #[arg(short, long)]
        json: Option<PathBuf>,
        /// Write a contour preview image
        #[arg(long)]
        preview: Option<PathBuf>,
        #[command(flatten)]
        extraction: ExtractionArgs,
    },
    /// Generate a KRL program from a sketch or previously extracted paths
    Generate {
        /// Sketch image (PNG or JPEG)
        #[arg(short, long, conflicts_with = "paths")]
        image: Option<PathBuf>,
        /// Paths JSON written by `extract --json`
        #[arg(short, long)]
        paths: Option<PathBuf>,
        /// Motion type per path, in path order (PTP, LIN, CIRC, SPLINE)
        #[arg(short, long = "motion", value_parser = MotionSpec::from_tag, default_value = "PTP")]
        motions: Vec<MotionSpec>,
        /// HOME or ANYWHERE
        #[arg(long, value_parser = StartPosition::from_tag, default_value = "HOME")]
        start: StartPosition,
        /// DIRECT or COORDINATES
        #[arg(long, value_parser = Interpretation::from_tag, default_value = "DIRECT")]
        interpretation: Interpretation,
        /// YES or NO; has no effect on the program
        #[arg(long, value_parser = Clarifications::from_tag, default_value = "YES")]
        clarifications: Clarifications,
        /// Program file to write; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a contour preview image
        #[arg(long)]
        preview: Option<PathBuf>,
        #[command(flatten)]
        extraction: ExtractionArgs,
    },
    /// Run a job described by a TOML or JSON file
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the JSON schema of a generation request
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { image, json, preview, extraction } => {
            let extraction = extract_sketch(&image, &extraction.to_config())?;
            for path in &extraction.paths {
                println!("path {}: {} point(s), starts at ({}, {})", path.id(), path.length(), path.first().x, path.first().y);
            }
            if let Some(preview) = preview {
                sketch::render::save_preview(&extraction, &preview)?;
                info!("Preview written to {}", preview.display());
            }
            if let Some(json) = json {
                write_paths(&extraction.paths, &json)?;
                info!("Paths written to {}", json.display());
            }
        }
        Commands::Generate {
            image,
            paths,
            motions,
            start,
            interpretation,
            clarifications,
            output,
            preview,
            extraction,
        } => {
            let job = JobConfig {
                image,
                paths,
                preview,
                extraction: extraction.to_config(),
                request: GenerationRequest::new(start, motions, interpretation, clarifications),
                ..JobConfig::default()
            };
            match output {
                Some(output) => {
                    JobConfig { output, ..job }.run()?;
                }
                None => print!("{}", job.execute()?.program),
            }
        }
        Commands::Run { config } => {
            let job = JobConfig::from_file(&config)?;
            info!("Running job {}", config.display());
            job.run()?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&GenerationRequest::schema())?);
        }
    }

    Ok(())
}
