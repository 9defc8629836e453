#[cfg(feature = "gui")]
slint::include_modules!();

#[cfg(feature = "gui")]
mod callbacks;
#[cfg(feature = "gui")]
mod window;

use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use annotate::analyse::annotations_per_label;
use annotate::classes::{self, LabelConfig};
use annotate::config::{self, AppConfig};
use annotate::console::{Console, RunOutcome};
use annotate::export::{self, OutputFormat};
use annotate::state::load_dataset;
use annotate::{AnnotationSession, Example, OptionSpec, TaskSpec, TaskType};

/// Label examples from a JSON file one at a time.
#[derive(Parser, Debug)]
#[command(name = "annotate", version, about)]
struct Cli {
    /// JSON file holding a list of examples or a table of rows
    input: PathBuf,

    /// single-label, multi-label, regression or free-text (inferred when omitted)
    #[arg(short, long)]
    task: Option<String>,

    /// Comma separated labels
    #[arg(short, long, value_delimiter = ',', conflicts_with = "range")]
    labels: Vec<String>,

    /// YAML file with the label set
    #[arg(long, conflicts_with_all = ["labels", "range"])]
    labels_file: Option<String>,

    /// Regression range as min,max or min,max,step
    #[arg(short, long)]
    range: Option<String>,

    /// Write the results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// table or mapping
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Present the examples in random order
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_back: bool,

    #[arg(long)]
    no_skip: bool,

    /// Pick single labels from a drop-down list instead of buttons
    #[arg(long)]
    dropdown: bool,

    /// Stay on the last example instead of finishing the session
    #[arg(long)]
    keep_going: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open a window instead of the terminal prompt
    #[arg(long)]
    gui: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = annotate::logging::init(cli.verbose) {
        eprintln!("{e}");
    }

    let mut config = config::load_config(cli.config.as_deref());
    apply_overrides(&mut config, &cli);

    let (options, label_file) = option_spec(&cli)?;
    let task = match cli.task.as_deref() {
        Some(name) => TaskSpec::new(name.parse::<TaskType>()?, options)?,
        None => TaskSpec::infer(options)?,
    };
    let shortcuts = label_file
        .as_ref()
        .map(LabelConfig::shortcuts)
        .unwrap_or_default();

    let dataset = load_dataset(&cli.input, &task, &config.columns)
        .with_context(|| format!("cannot load {}", cli.input.display()))?;
    let builder = AnnotationSession::from_records(dataset.records, task)
        .options(config.session_options());
    let mut session = match config.session.seed {
        Some(seed) => builder.build_with_rng(&mut StdRng::seed_from_u64(seed)),
        None => builder.build(),
    };

    if cli.gui {
        let session = run_window(session, &config)?;
        finish(&session.borrow(), &cli, &config)?;
    } else {
        run_console(&mut session, &config, shortcuts)?;
        finish(&session, &cli, &config)?;
    }
    remember_dataset(&cli);
    Ok(())
}

fn run_console(
    session: &mut AnnotationSession<Example>,
    config: &AppConfig,
    shortcuts: Vec<(String, String)>,
) -> Result<()> {
    let stderr = io::stderr();
    let ansi = stderr.is_terminal();
    let mut console = Console::new(io::stdin().lock(), stderr)
        .with_display(config.display.display_options())
        .with_shortcuts(shortcuts)
        .with_buttons_in_a_row(config.display.buttons_in_a_row)
        .with_ansi(ansi);
    match console.run(session)? {
        RunOutcome::Completed => {}
        outcome => tracing::info!(?outcome, "session left before the end"),
    }
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if cli.shuffle {
        config.session.shuffle = true;
    }
    if cli.seed.is_some() {
        config.session.seed = cli.seed;
    }
    if cli.no_back {
        config.session.include_back = false;
    }
    if cli.no_skip {
        config.session.include_skip = false;
    }
    if cli.keep_going {
        config.session.stop_at_last_example = false;
    }
    if cli.dropdown {
        config.display.use_dropdown = true;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
}

/// Options from the command line, or the label file when no inline options
/// were given.
fn option_spec(cli: &Cli) -> Result<(OptionSpec, Option<LabelConfig>)> {
    if let Some(range) = &cli.range {
        return Ok((OptionSpec::parse_range(range)?, None));
    }
    if !cli.labels.is_empty() {
        return Ok((OptionSpec::labels(&cli.labels), None));
    }

    let wants_labels = match cli.task.as_deref().map(str::parse::<TaskType>) {
        Some(Ok(TaskType::SingleLabel | TaskType::MultiLabel)) | None => true,
        Some(_) => false,
    };
    if cli.labels_file.is_none() && !wants_labels {
        return Ok((OptionSpec::None, None));
    }
    match classes::load_labels(cli.labels_file.as_deref()).map_err(anyhow::Error::msg)? {
        Some(labels) => Ok((OptionSpec::labels(labels.names()), Some(labels))),
        None => Ok((OptionSpec::None, None)),
    }
}

fn finish(session: &AnnotationSession<Example>, cli: &Cli, config: &AppConfig) -> Result<()> {
    let records = session.results();
    let task = session.task();
    let format = config.output.format;
    match &cli.output {
        Some(path) => {
            export::save_export(path, records, task, &config.columns, format)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            export::write_export(&mut stdout, records, task, &config.columns, format)?;
        }
    }

    let summary = session.progress_summary();
    tracing::info!(
        annotated = summary.annotated,
        total = summary.total,
        "annotation summary"
    );
    for (label, count) in annotations_per_label(records, task.labels()) {
        tracing::info!(label = %label, count, "annotations per label");
    }
    Ok(())
}

/// Record the input in the stored config's recent datasets. Command line
/// overrides are not written back.
fn remember_dataset(cli: &Cli) {
    let Some(path) = cli.config.clone().or_else(config::config_path) else {
        return;
    };
    let mut stored = config::load_config(Some(path.as_path()));
    config::add_recent_dataset(&mut stored, cli.input.display().to_string());
    if let Err(e) = config::save_config(&stored, &path) {
        tracing::warn!("Failed to remember dataset: {e}");
    }
}

#[cfg(feature = "gui")]
fn run_window(
    session: AnnotationSession<Example>,
    config: &AppConfig,
) -> Result<window::SharedSession> {
    let shared = Rc::new(RefCell::new(session));
    window::run(shared.clone(), config.display.display_options())?;
    Ok(shared)
}

#[cfg(not(feature = "gui"))]
fn run_window(
    _session: AnnotationSession<Example>,
    _config: &AppConfig,
) -> Result<Rc<RefCell<AnnotationSession<Example>>>> {
    anyhow::bail!("this build has no window support; rebuild with `--features gui`")
}
