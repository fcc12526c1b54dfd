use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use turnaround_core::{layers, morph, Driver, SceneGraph, StaticInput, TracingDiagnostics};
use turnaround_schema::{build_scene, export_scene, load_document, save_document, Document};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the head and body turn-around frames
    Turn {
        #[command(flatten)]
        doc: DocArgs,
        /// Number of in-between frames (at least 2)
        #[arg(long, short = 'n')]
        frames: String,
        /// Keep the quarter-turn nose as drawn. Without this flag the nose is
        /// mirrored in every quarter frame
        #[arg(long)]
        nose_points_right: bool,
    },
    /// Add in-between shapes between the two shapes of a layer
    Morph {
        #[command(flatten)]
        doc: DocArgs,
        /// Layer holding exactly two shapes
        #[arg(long)]
        layer: String,
        /// Number of intermediate shapes
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
    /// Hide every layer with one of the given names
    Hide {
        #[command(flatten)]
        doc: DocArgs,
        #[arg(long = "name", required = true)]
        names: Vec<String>,
    },
    /// Make every layer visible
    Show {
        #[command(flatten)]
        doc: DocArgs,
    },
    /// Replace text in a layer's name and in the names of its ancestors
    Rename {
        #[command(flatten)]
        doc: DocArgs,
        /// First layer with this name is renamed
        #[arg(long)]
        layer: String,
        #[arg(long)]
        find: String,
        #[arg(long)]
        replace: String,
    },
    /// Remove "copy N" / "- copie N" suffixes from layer names
    StripCopies {
        #[command(flatten)]
        doc: DocArgs,
        /// Highest copy number to look for
        #[arg(long, default_value_t = 20)]
        max: usize,
    },
    /// Add an empty character rig to the document
    Template {
        #[command(flatten)]
        doc: DocArgs,
    },
}

#[derive(Args, Debug)]
struct DocArgs {
    /// Path to the input document (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output document path
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl DocArgs {
    fn output_path(&self, suffix: &str) -> PathBuf {
        match &self.output {
            Some(out) => out.clone(),
            None => {
                let mut p = self.input.clone();
                p.set_extension(format!("{}.json", suffix));
                p
            }
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_string()));

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Turn {
            doc,
            frames,
            nose_points_right,
        } => edit(&doc, "turned", |scene| {
            let input = StaticInput::new(frames, nose_points_right);
            let summary = Driver::new().run(scene, &input, &mut TracingDiagnostics)?;
            info!(
                head_frames = summary.head_frames().count(),
                body_frames = summary.body_frames().count(),
                skipped = summary.skipped.len(),
                "Frames generated"
            );
            Ok(())
        }),
        Command::Morph { doc, layer, steps } => edit(&doc, "morphed", |scene| {
            let id = scene.require_by_name(scene.root(), &layer)?;
            morph::add_intermediate_shapes(scene, id, steps)?;
            Ok(())
        }),
        Command::Hide { doc, names } => edit(&doc, "hidden", |scene| {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let root = scene.root();
            if layers::hide_by_name(scene, root, &names) == 0 {
                info!("No layer matched");
            }
            Ok(())
        }),
        Command::Show { doc } => edit(&doc, "shown", |scene| {
            let root = scene.root();
            layers::show_all(scene, root);
            Ok(())
        }),
        Command::Rename {
            doc,
            layer,
            find,
            replace,
        } => edit(&doc, "renamed", |scene| {
            let id = scene.require_by_name(scene.root(), &layer)?;
            let renamed = layers::rename_with_ancestors(scene, id, &find, &replace)?;
            info!(renamed, "Layers renamed");
            Ok(())
        }),
        Command::StripCopies { doc, max } => edit(&doc, "stripped", |scene| {
            let root = scene.root();
            layers::strip_copy_suffixes(scene, root, max)?;
            Ok(())
        }),
        Command::Template { doc } => edit(&doc, "template", |scene| {
            layers::create_character_template(scene);
            Ok(())
        }),
    }
}

/// Loads the input document, applies `op` to its scene and saves the result.
fn edit(doc: &DocArgs, suffix: &str, op: impl FnOnce(&mut SceneGraph) -> Result<()>) -> Result<()> {
    let output = doc.output_path(suffix);
    if output == doc.input {
        bail!("Output would overwrite the input document {:?}", doc.input);
    }
    info!("Input: {:?}", doc.input);
    info!("Output: {:?}", output);

    let document = read_document(&doc.input)?;
    let mut scene = build_scene(&document);
    op(&mut scene)?;
    save_document(&output, &export_scene(&scene))
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!("Document saved.");
    Ok(())
}

fn read_document(path: &Path) -> Result<Document> {
    load_document(path).with_context(|| format!("Failed to read document {:?}", path))
}
