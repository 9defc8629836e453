//! Line-oriented terminal front end.
//!
//! Shows one example at a time and reads one line per action. Lines starting
//! with `:` are commands (`:skip`, `:back`, `:quit`, `:help`); anything else
//! is a label for the current example. Free-text answers that must start with
//! a colon are written with a doubled `::`.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::decorate::{self, DisplayOptions};
use crate::error::{CallbackError, Error, ValidationError};
use crate::progress::ProgressSummary;
use crate::render::{Renderer, Step, WidgetState};
use crate::state::{AnnotationSession, SessionPhase};
use crate::task::{LabelValue, TaskSpec, TaskType};
use crate::utils::rows;

const HELP: &str = "commands: :skip (:next), :back (:prev), :quit, :help";

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Session(#[from] Error),
}

impl From<CallbackError> for ConsoleError {
    fn from(err: CallbackError) -> Self {
        ConsoleError::Session(err.into())
    }
}

/// How an interactive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Quit,
    EndOfInput,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Submit(LabelValue),
    Skip,
    Back,
    Quit,
    Help,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("unknown command ':{0}' (try :help)")]
    UnknownCommand(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Interpret a line typed by the annotator for `task`.
///
/// Classification answers may be a 1-based option number, the label itself or
/// one of `shortcuts` (`(key, label)` pairs). Multi-label answers are comma
/// separated; an empty line selects nothing.
pub fn parse_command(
    line: &str,
    task: &TaskSpec,
    shortcuts: &[(String, String)],
) -> Result<Command, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(command) = line.strip_prefix(':') {
        if !command.starts_with(':') {
            return match command.trim().to_ascii_lowercase().as_str() {
                "skip" | "next" | "n" | "s" => Ok(Command::Skip),
                "back" | "prev" | "b" | "p" => Ok(Command::Back),
                "quit" | "q" => Ok(Command::Quit),
                "help" | "h" | "?" => Ok(Command::Help),
                other => Err(InputError::UnknownCommand(other.to_string())),
            };
        }
    }
    let answer = line.strip_prefix(':').unwrap_or(line);

    let value = match task {
        TaskSpec::SingleLabel(labels) => {
            LabelValue::Label(resolve_label(answer.trim(), labels, shortcuts))
        }
        TaskSpec::MultiLabel(labels) => LabelValue::Labels(
            answer
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| resolve_label(token, labels, shortcuts))
                .collect(),
        ),
        TaskSpec::Regression(_) => {
            let number = answer
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::WrongShape {
                    task: TaskType::Regression.name(),
                    expected: "a number",
                })?;
            LabelValue::Number(number)
        }
        TaskSpec::FreeText => LabelValue::Text(answer.to_string()),
    };
    Ok(Command::Submit(value))
}

/// Map an option number or shortcut to its label; anything else is passed
/// through for validation.
fn resolve_label(token: &str, labels: &[String], shortcuts: &[(String, String)]) -> String {
    if let Ok(number) = token.parse::<usize>() {
        if let Some(label) = number.checked_sub(1).and_then(|i| labels.get(i)) {
            return label.clone();
        }
    }
    if labels.iter().any(|label| label == token) {
        return token.to_string();
    }
    shortcuts
        .iter()
        .find(|(key, _)| key == token)
        .map_or_else(|| token.to_string(), |(_, label)| label.clone())
}

pub struct Console<R, W> {
    input: R,
    output: W,
    display: DisplayOptions,
    shortcuts: Vec<(String, String)>,
    buttons_in_a_row: usize,
    ansi: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            display: DisplayOptions::default(),
            shortcuts: Vec::new(),
            buttons_in_a_row: 4,
            ansi: false,
        }
    }

    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: Vec<(String, String)>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn with_buttons_in_a_row(mut self, buttons_in_a_row: usize) -> Self {
        self.buttons_in_a_row = buttons_in_a_row;
        self
    }

    /// Emit ANSI styling for decorated example text.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drive `session` until it completes, the user quits or input ends.
    pub fn run<E: Clone + Display>(
        &mut self,
        session: &mut AnnotationSession<E>,
    ) -> Result<RunOutcome, ConsoleError> {
        let mut step = match session.phase() {
            SessionPhase::NotStarted => session.advance()?,
            _ => session.current(),
        };
        let mut redraw = true;

        loop {
            if redraw {
                self.render(&step, &session.progress_summary())?;
            }
            redraw = true;
            let Some(intent) = step.intent() else {
                return Ok(RunOutcome::Completed);
            };
            let navigation = intent.navigation;

            write!(self.output, "> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(RunOutcome::EndOfInput);
            }

            match parse_command(&line, session.task(), &self.shortcuts) {
                Ok(Command::Submit(value)) => match session.submit(value) {
                    Ok(next) => step = next,
                    Err(Error::Validation(err)) => {
                        writeln!(self.output, "rejected: {err}")?;
                        redraw = false;
                    }
                    Err(err) => return Err(err.into()),
                },
                Ok(Command::Skip) if navigation.skip => step = session.skip()?,
                Ok(Command::Skip) => {
                    writeln!(self.output, "skipping is not available here")?;
                    redraw = false;
                }
                Ok(Command::Back) if navigation.back => step = session.retreat(),
                Ok(Command::Back) => {
                    writeln!(self.output, "going back is not available here")?;
                    redraw = false;
                }
                Ok(Command::Quit) => return Ok(RunOutcome::Quit),
                Ok(Command::Help) => {
                    writeln!(self.output, "{HELP}")?;
                    redraw = false;
                }
                Err(err) => {
                    writeln!(self.output, "rejected: {err}")?;
                    redraw = false;
                }
            }
        }
    }

    fn write_widget(&mut self, widget: &WidgetState) -> io::Result<()> {
        match widget {
            WidgetState::Buttons { options, selected } => {
                let cells: Vec<String> = options
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let mark = if selected.as_ref() == Some(label) { " ✓" } else { "" };
                        format!("[{}] {label}{mark}", i + 1)
                    })
                    .collect();
                for row in rows(&cells, self.buttons_in_a_row) {
                    writeln!(self.output, "{}", row.join("  "))?;
                }
            }
            WidgetState::Dropdown { options, selected } => {
                for (i, label) in options.iter().enumerate() {
                    let mark = if selected.as_ref() == Some(label) { '*' } else { ' ' };
                    writeln!(self.output, "{mark} {}) {label}", i + 1)?;
                }
            }
            WidgetState::Toggles(toggles) => {
                let cells: Vec<String> = toggles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let mark = if t.on { 'x' } else { ' ' };
                        format!("{}:[{mark}] {}", i + 1, t.label)
                    })
                    .collect();
                for row in rows(&cells, self.buttons_in_a_row) {
                    writeln!(self.output, "{}", row.join("  "))?;
                }
                writeln!(self.output, "(comma separated, empty line for none)")?;
            }
            WidgetState::Slider { range, value } => {
                let step = range
                    .step
                    .map(|s| format!(", step {s}"))
                    .unwrap_or_default();
                writeln!(
                    self.output,
                    "value in [{}, {}]{step} (current: {value})",
                    range.min, range.max
                )?;
            }
            WidgetState::TextArea { text } => {
                if text.is_empty() {
                    writeln!(self.output, "(type the text)")?;
                } else {
                    writeln!(self.output, "current: {text}")?;
                }
            }
        }
        Ok(())
    }
}

impl<E: Display, R: BufRead, W: Write> Renderer<E> for Console<R, W> {
    type Error = io::Error;

    fn render(&mut self, step: &Step<E>, progress: &ProgressSummary) -> io::Result<()> {
        writeln!(self.output, "{progress}")?;
        match step {
            Step::NotStarted => {}
            Step::Complete => writeln!(self.output, "Annotation done.")?,
            Step::Show(intent) => {
                let segments = decorate::decorate(&intent.example.to_string(), &self.display);
                let text = if self.ansi {
                    decorate::to_ansi(&segments, &self.display.checkerboard_colors)
                } else {
                    decorate::to_plain(&segments)
                };
                writeln!(self.output, "{text}")?;
                self.write_widget(&intent.widget)?;
            }
        }
        Ok(())
    }
}
