//! Scenemark: typed landmarks, objects and scenes for vision pipelines.
//!
//! Scenemark models the output of computer-vision processors (face, pose and
//! hand detectors) as a tree of objects and landmarks, and converts that tree
//! between pixel coordinates and the relative [0, 1] coordinates detectors
//! produce. The coordinate space is part of the type, so pixel and relative
//! values cannot be mixed by accident.
//!
//! # Modules
//!
//! - [`model`]: Landmarks, objects, scenes and coordinate conversion
//! - [`processor`]: Image processor boundary and scene composition
//! - [`validation`]: Scene validation and error reporting
//! - [`error`]: Error types for scenemark operations

pub mod error;
pub mod model;
pub mod processor;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::ScenemarkError;

use model::{io_json, io_yaml, Pixel, Scene, SceneDocument};

/// The scenemark CLI application.
#[derive(Parser)]
#[command(name = "scenemark")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log conversions and merges (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a scene for errors and warnings.
    Validate(ValidateArgs),
    /// Convert a pixel scene to relative coordinates.
    Normalize(ConvertArgs),
    /// Convert a relative scene back to pixel coordinates.
    Denormalize(ConvertArgs),
    /// Combine scenes of the same image into one.
    Merge(MergeArgs),
    /// Write an empty pixel scene sized to an image.
    Init(InitArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input scene to validate.
    input: PathBuf,

    /// Input format ('json' or 'yaml'); inferred from the extension if omitted.
    #[arg(long)]
    format: Option<String>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Also check depth values.
    #[arg(long)]
    check_z: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the normalize and denormalize subcommands.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input scene.
    input: PathBuf,

    /// Output scene; format inferred from the extension.
    #[arg(short, long)]
    output: PathBuf,

    /// Pixel depth scale (defaults to the image width).
    #[arg(long)]
    depth_scale: Option<f32>,
}

/// Arguments for the merge subcommand.
#[derive(clap::Args)]
struct MergeArgs {
    /// Scenes to merge, in order. All must share a coordinate space.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output scene; format inferred from the extension.
    #[arg(short, long)]
    output: PathBuf,
}

/// Arguments for the init subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Image whose header gives the scene dimensions.
    image: PathBuf,

    /// Output scene; format inferred from the extension.
    #[arg(short, long)]
    output: PathBuf,

    /// Source processor recorded on the scene.
    #[arg(long, default_value = "scenemark")]
    processor: String,
}

/// On-disk scene encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneFormat {
    Json,
    Yaml,
}

impl SceneFormat {
    fn parse(name: &str) -> Result<Self, ScenemarkError> {
        match name {
            "json" => Ok(SceneFormat::Json),
            "yaml" | "yml" => Ok(SceneFormat::Yaml),
            other => Err(ScenemarkError::UnsupportedFormat(format!(
                "'{}' (supported: json, yaml)",
                other
            ))),
        }
    }

    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SceneFormat::Yaml
            }
            _ => SceneFormat::Json,
        }
    }
}

fn read_document(path: &Path, format: SceneFormat) -> Result<SceneDocument, ScenemarkError> {
    log::debug!("reading {:?} scene from {}", format, path.display());
    match format {
        SceneFormat::Json => io_json::read_scene_json(path),
        SceneFormat::Yaml => io_yaml::read_scene_yaml(path),
    }
}

fn write_document(path: &Path, document: &SceneDocument) -> Result<(), ScenemarkError> {
    match SceneFormat::from_path(path) {
        SceneFormat::Json => io_json::write_scene_json(path, document),
        SceneFormat::Yaml => io_yaml::write_scene_yaml(path, document),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second init (e.g. from tests calling run twice) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Run the scenemark CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ScenemarkError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Normalize(args)) => run_normalize(args),
        Some(Commands::Denormalize(args)) => run_denormalize(args),
        Some(Commands::Merge(args)) => run_merge(args),
        Some(Commands::Init(args)) => run_init(args),
        None => {
            println!("scenemark {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Typed landmarks, objects and scenes for vision pipelines.");
            println!();
            println!("Run 'scenemark --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), ScenemarkError> {
    let format = match args.format.as_deref() {
        Some(name) => SceneFormat::parse(name)?,
        None => SceneFormat::from_path(&args.input),
    };
    let document = read_document(&args.input, format)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
        check_z: args.check_z,
        ..Default::default()
    };
    let report = match &document {
        SceneDocument::Pixel(scene) => validation::validate_scene(scene, &opts),
        SceneDocument::Normalized(scene) => validation::validate_scene(scene, &opts),
    };

    match args.output.as_str() {
        "json" => {
            let summary = serde_json::json!({
                "space": document.space(),
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": report.issues,
            });
            let text = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
            println!("{}", text);
        }
        "text" => print!("{}", report),
        other => {
            return Err(ScenemarkError::UnsupportedFormat(format!(
                "report output '{}' (supported: text, json)",
                other
            )));
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (opts.strict && has_warnings) {
        Err(ScenemarkError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the normalize subcommand.
fn run_normalize(args: ConvertArgs) -> Result<(), ScenemarkError> {
    let scene = match read_document(&args.input, SceneFormat::from_path(&args.input))? {
        SceneDocument::Pixel(scene) => scene,
        SceneDocument::Normalized(_) => {
            return Err(ScenemarkError::InvalidArgument(format!(
                "{} is already in normalized space",
                args.input.display()
            )));
        }
    };

    let normalized = match args.depth_scale {
        Some(depth_scale) => scene.to_normalized_with_depth(depth_scale)?,
        None => scene.to_normalized()?,
    };
    write_document(&args.output, &normalized.into())?;
    println!(
        "Normalized {} -> {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Execute the denormalize subcommand.
fn run_denormalize(args: ConvertArgs) -> Result<(), ScenemarkError> {
    let scene = match read_document(&args.input, SceneFormat::from_path(&args.input))? {
        SceneDocument::Normalized(scene) => scene,
        SceneDocument::Pixel(_) => {
            return Err(ScenemarkError::InvalidArgument(format!(
                "{} is already in pixel space",
                args.input.display()
            )));
        }
    };

    let pixel = match args.depth_scale {
        Some(depth_scale) => scene.to_pixel_with_depth(depth_scale)?,
        None => scene.to_pixel()?,
    };
    write_document(&args.output, &pixel.into())?;
    println!(
        "Denormalized {} -> {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Execute the merge subcommand.
fn run_merge(args: MergeArgs) -> Result<(), ScenemarkError> {
    let mut merged: Option<SceneDocument> = None;

    for input in &args.inputs {
        let next = read_document(input, SceneFormat::from_path(input))?;
        merged = Some(match (merged, next) {
            (None, next) => next,
            (Some(SceneDocument::Pixel(acc)), SceneDocument::Pixel(next)) => {
                SceneDocument::Pixel(acc.combine(&next)?)
            }
            (Some(SceneDocument::Normalized(acc)), SceneDocument::Normalized(next)) => {
                SceneDocument::Normalized(acc.combine(&next)?)
            }
            (Some(acc), next) => {
                return Err(ScenemarkError::InvalidArgument(format!(
                    "cannot merge a {} scene from {} into {} scenes",
                    next.space(),
                    input.display(),
                    acc.space()
                )));
            }
        });
    }

    let merged = merged.ok_or_else(|| {
        ScenemarkError::InvalidArgument("merge needs at least one input".to_string())
    })?;
    write_document(&args.output, &merged)?;
    println!(
        "Merged {} scene(s) -> {}",
        args.inputs.len(),
        args.output.display()
    );
    Ok(())
}

/// Execute the init subcommand.
fn run_init(args: InitArgs) -> Result<(), ScenemarkError> {
    let (width, height) = processor::read_image_dimensions(&args.image)?;
    let scene: Scene<Pixel> = Scene::empty(width, height, args.processor);
    write_document(&args.output, &scene.into())?;
    println!(
        "Initialized {}x{} scene from {} -> {}",
        width,
        height,
        args.image.display(),
        args.output.display()
    );
    Ok(())
}
