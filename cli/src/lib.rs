use clap::Args;
use krl::{GenerationRequest, GeneratorOptions, KrlError, Program, ProgramGenerator};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sketch::{Extraction, ExtractionConfig, PathExtractor, SketchError};
use sketch_common::{Path as SketchPath, PathError, utils::is_sketch_file};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_OUTPUT: &str = "sketch_program.src";

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Sketch(#[from] SketchError),
    #[error(transparent)]
    Krl(#[from] KrlError),
    #[error(transparent)]
    Paths(#[from] PathError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Give either 'image' or 'paths', not both")]
    ConflictingInputs,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Unsupported sketch image '{}'. Please use .png, .jpg or .jpeg files", .0.display())]
    UnsupportedImageFormat(PathBuf),
}

/// Extraction overrides shared by the `extract` and `generate` commands
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ExtractionArgs {
    /// Binarization level (0-255); darker pixels count as strokes
    #[arg(long)]
    pub threshold: Option<u8>,
    /// Gaussian blur sigma applied before binarization
    #[arg(long)]
    pub blur: Option<f32>,
    /// Closing radius after binarization
    #[arg(long, conflicts_with = "no_closing")]
    pub closing: Option<u8>,
    /// Skip the closing pass
    #[arg(long)]
    pub no_closing: bool,
    /// Simplification tolerance as a fraction of contour perimeter
    #[arg(long)]
    pub epsilon_ratio: Option<f64>,
}

impl ExtractionArgs {
    /// Apply the overrides on top of `base`
    pub fn apply(&self, base: ExtractionConfig) -> ExtractionConfig {
        let mut config = base;
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(sigma) = self.blur {
            config.blur_sigma = Some(sigma);
        }
        if let Some(radius) = self.closing {
            config.closing_radius = Some(radius);
        }
        if self.no_closing {
            config.closing_radius = None;
        }
        if let Some(ratio) = self.epsilon_ratio {
            config.epsilon_ratio = ratio;
        }
        config
    }

    pub fn to_config(&self) -> ExtractionConfig {
        self.apply(ExtractionConfig::default())
    }
}

/// Extract paths from a PNG or JPEG sketch
pub fn extract_sketch<P: AsRef<Path>>(image: P, config: &ExtractionConfig) -> Result<Extraction, CliError> {
    let image = image.as_ref();
    if !is_sketch_file(image) {
        return Err(CliError::UnsupportedImageFormat(image.to_path_buf()));
    }
    Ok(PathExtractor::from_config(config).extract_file(image)?)
}

/// One sketch-to-program job
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct JobConfig {
    /// Sketch image to extract paths from
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Paths JSON from an earlier extraction, used instead of an image
    #[serde(default)]
    pub paths: Option<PathBuf>,
    /// Where to write the contour preview, if anywhere
    #[serde(default)]
    pub preview: Option<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub request: GenerationRequest,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub generator: GeneratorOptions,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            image: None,
            paths: None,
            preview: None,
            output: default_output(),
            request: GenerationRequest::default(),
            extraction: ExtractionConfig::default(),
            generator: GeneratorOptions::default(),
        }
    }
}

/// What a job produced
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub paths: Vec<SketchPath>,
    pub program: Program,
}

impl JobConfig {
    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Collect the job's paths: extracted from the image, read from a
    /// paths file, or none at all (the program then gets sample motions)
    pub fn load_paths(&self) -> Result<Vec<SketchPath>, CliError> {
        match (&self.image, &self.paths) {
            (Some(_), Some(_)) => Err(CliError::ConflictingInputs),
            (Some(image), None) => {
                let extraction = extract_sketch(image, &self.extraction)?;
                if let Some(preview) = &self.preview {
                    sketch::render::save_preview(&extraction, preview)?;
                    info!("Preview written to {}", preview.display());
                }
                Ok(extraction.into_paths())
            }
            (None, Some(paths)) => read_paths(paths),
            (None, None) => {
                warn!("No image or paths given, generating sample motions");
                Ok(Vec::new())
            }
        }
    }

    /// Extract (or load) paths and build the program, without writing it
    pub fn execute(&self) -> Result<JobOutcome, CliError> {
        let generator = ProgramGenerator::new(&self.generator)?;
        let canvas = generator.canvas();
        debug!("Mapping paths from a {}x{} canvas", canvas.width(), canvas.height());
        let paths = self.load_paths()?;
        let program = generator.build(&self.request, &paths);
        Ok(JobOutcome { paths, program })
    }

    /// Execute the job and write the program to `output`
    pub fn run(&self) -> Result<JobOutcome, CliError> {
        let outcome = self.execute()?;
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, outcome.program.to_string())?;
        info!(
            "Wrote {} ({} path(s), {} motion statement(s)) to {}",
            outcome.program.file_name(),
            outcome.paths.len(),
            outcome.program.motion_count(),
            self.output.display()
        );
        Ok(outcome)
    }
}

/// Read a paths JSON file written by `write_paths`
pub fn read_paths<P: AsRef<Path>>(path: P) -> Result<Vec<SketchPath>, CliError> {
    let content = fs::read_to_string(path)?;
    Ok(sketch_common::utils::paths_from_json(&content)?)
}

pub fn write_paths<P: AsRef<Path>>(paths: &[SketchPath], path: P) -> Result<(), CliError> {
    fs::write(path, sketch_common::utils::paths_to_json(paths)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use krl::{Interpretation, MotionSpec, StartPosition};
    use sketch_common::Point;

    fn write_stroke_png(dir: &Path) -> PathBuf {
        let mut img = GrayImage::from_pixel(400, 300, Luma([255u8]));
        for y in 49..=51 {
            for x in 50..=200 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        let target = dir.join("sketch.png");
        img.save(&target).unwrap();
        target
    }

    #[test]
    fn test_toml_job_with_defaults() {
        let job = JobConfig::from_toml(
            r#"
image = "sketch.png"

[request]
start_position = "ANYWHERE"
motion_specs = ["LIN", "circ"]
interpretation = "COORDINATES"
"#,
        )
        .unwrap();

        assert_eq!(job.image, Some(PathBuf::from("sketch.png")));
        assert_eq!(job.request.start_position, StartPosition::Anywhere);
        assert_eq!(job.request.motion_specs, vec![MotionSpec::Lin, MotionSpec::Circ]);
        assert_eq!(job.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(job.extraction, ExtractionConfig::default());
        assert_eq!(job.generator, GeneratorOptions::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let job = JobConfig {
            paths: Some(PathBuf::from("paths.json")),
            ..JobConfig::default()
        };
        let reloaded = JobConfig::from_toml(&job.to_toml().unwrap()).unwrap();
        assert_eq!(reloaded, job);
    }

    #[test]
    fn test_json_roundtrip() {
        let job = JobConfig {
            image: Some(PathBuf::from("scan.jpg")),
            extraction: ExtractionConfig::smoothed(),
            ..JobConfig::default()
        };
        let reloaded = JobConfig::from_json(&job.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, job);
    }

    #[test]
    fn test_non_sketch_image_is_rejected() {
        let job = JobConfig { image: Some(PathBuf::from("notes.txt")), ..JobConfig::default() };
        assert!(matches!(job.execute(), Err(CliError::UnsupportedImageFormat(_))));
        assert!(matches!(
            extract_sketch("drawing.bmp", &ExtractionConfig::default()),
            Err(CliError::UnsupportedImageFormat(_))
        ));
    }

    #[derive(clap::Parser)]
    struct ExtractionFlags {
        #[command(flatten)]
        extraction: ExtractionArgs,
    }

    fn parse_flags(args: &[&str]) -> ExtractionConfig {
        use clap::Parser;
        let mut argv = vec!["sketch2krl"];
        argv.extend_from_slice(args);
        ExtractionFlags::parse_from(argv).extraction.to_config()
    }

    #[test]
    fn test_extraction_flags_default_to_config_defaults() {
        assert_eq!(parse_flags(&[]), ExtractionConfig::default());
    }

    #[test]
    fn test_extraction_flags_override() {
        let config = parse_flags(&["--threshold", "90", "--blur", "1.5", "--no-closing", "--epsilon-ratio", "0.05"]);
        assert_eq!(config.threshold, 90);
        assert_eq!(config.blur_sigma, Some(1.5));
        assert_eq!(config.closing_radius, None);
        assert_eq!(config.epsilon_ratio, 0.05);

        assert_eq!(parse_flags(&["--closing", "2"]).closing_radius, Some(2));
    }

    #[test]
    fn test_conflicting_closing_flags_rejected() {
        use clap::Parser;
        let result = ExtractionFlags::try_parse_from(["sketch2krl", "--closing", "2", "--no-closing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_thin_line_job_with_default_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = GrayImage::from_pixel(400, 300, Luma([255u8]));
        for x in 50..=200 {
            img.put_pixel(x, 50, Luma([0u8]));
        }
        let image = dir.path().join("line.png");
        img.save(&image).unwrap();

        let job = JobConfig {
            image: Some(image),
            request: GenerationRequest {
                start_position: StartPosition::Anywhere,
                motion_specs: vec![MotionSpec::Lin],
                interpretation: Interpretation::Coordinates,
                ..GenerationRequest::default()
            },
            ..JobConfig::default()
        };
        let outcome = job.execute().unwrap();
        assert_eq!(outcome.paths.len(), 1);
        assert!(outcome.program.to_string().contains("  LIN {X 200.0, Y 233.33, Z 300, A 0, B 0, C 0, S 6, T 27} C_VEL\n"));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = JobConfig::from_file("job.yaml");
        assert!(matches!(result, Err(CliError::UnsupportedFileFormat)));
    }

    #[test]
    fn test_unknown_motion_in_job_is_rejected() {
        let result = JobConfig::from_json(r#"{"request": {"motion_specs": ["TELEPORT"]}}"#);
        assert!(matches!(result, Err(CliError::SerdeError(_))));
    }

    #[test]
    fn test_image_and_paths_conflict() {
        let job = JobConfig {
            image: Some(PathBuf::from("a.png")),
            paths: Some(PathBuf::from("a.json")),
            ..JobConfig::default()
        };
        assert!(matches!(job.execute(), Err(CliError::ConflictingInputs)));
    }

    #[test]
    fn test_job_without_input_emits_samples() {
        let outcome = JobConfig::default().execute().unwrap();
        assert!(outcome.paths.is_empty());
        let text = outcome.program.to_string();
        assert!(text.contains("; No paths detected in sketch, generating sample motions"));
        assert!(text.contains("PTP {X 100, Y 200, Z 300, A 0, B 0, C 0, S 6, T 27} ; Sample point 1"));
    }

    #[test]
    fn test_image_job_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_stroke_png(dir.path());
        let job = JobConfig {
            image: Some(image),
            preview: Some(dir.path().join("processed.png")),
            output: dir.path().join("out").join("sketch_program.src"),
            request: GenerationRequest {
                start_position: StartPosition::Anywhere,
                motion_specs: vec![MotionSpec::Lin],
                interpretation: Interpretation::Coordinates,
                ..GenerationRequest::default()
            },
            extraction: ExtractionConfig::crisp(),
            ..JobConfig::default()
        };

        let outcome = job.run().unwrap();
        assert_eq!(outcome.paths.len(), 1);
        assert_eq!(outcome.paths[0].points(), &[Point::new(50, 49), Point::new(200, 51)]);

        let written = fs::read_to_string(&job.output).unwrap();
        assert_eq!(written, outcome.program.to_string());
        assert!(written.contains("  LIN {X 200.0, Y 230.67, Z 300, A 0, B 0, C 0, S 6, T 27} C_VEL\n"));
        assert!(!written.contains("PTP home_position"));
        assert!(dir.path().join("processed.png").exists());
    }

    #[test]
    fn test_paths_file_roundtrip_feeds_generation() {
        let dir = tempfile::tempdir().unwrap();
        let paths_file = dir.path().join("paths.json");
        let paths = vec![SketchPath::new(0, vec![Point::new(50, 50), Point::new(200, 50)]).unwrap()];
        write_paths(&paths, &paths_file).unwrap();

        let job = JobConfig {
            paths: Some(paths_file),
            request: GenerationRequest {
                motion_specs: vec![MotionSpec::Lin],
                interpretation: Interpretation::Coordinates,
                ..GenerationRequest::default()
            },
            ..JobConfig::default()
        };
        let outcome = job.execute().unwrap();
        assert_eq!(outcome.paths, paths);
        let text = outcome.program.to_string();
        assert!(text.contains("LIN {X 200.0, Y 233.33, Z 300, A 0, B 0, C 0, S 6, T 27} C_VEL"));
        assert_eq!(text.lines().filter(|l| l.contains("PTP home_position")).count(), 2);
    }

    #[test]
    fn test_bad_image_surfaces_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.png");
        fs::write(&bogus, b"not an image").unwrap();
        let job = JobConfig { image: Some(bogus), ..JobConfig::default() };
        assert!(matches!(job.execute(), Err(CliError::Sketch(SketchError::InvalidImage(_)))));
    }

    #[test]
    fn test_invalid_program_name_rejected() {
        let mut job = JobConfig::default();
        job.generator.program_name = "has space".to_string();
        assert!(matches!(job.execute(), Err(CliError::Krl(KrlError::InvalidIdentifier(_)))));
    }
}
