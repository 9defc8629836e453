//! Reading aids for example text: bionic reading and checkerboard shading.
//!
//! Decoration produces styled [`Segment`]s so each front end can render them
//! in its own way (ANSI escapes in the terminal, plain text in the window).

use crate::utils::parse_color;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Bold the first characters of long words.
    pub bionic_reading: bool,
    /// Words must be longer than this to be emphasized.
    pub bionic_min_word_length: usize,
    pub bionic_first_characters: usize,
    /// Alternate the background of consecutive sentences.
    pub checkerboard: bool,
    pub checkerboard_colors: [String; 2],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            bionic_reading: false,
            bionic_min_word_length: 6,
            bionic_first_characters: 2,
            checkerboard: false,
            checkerboard_colors: ["#e1e3e1".to_string(), "#bab8b8".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    /// Index into the checkerboard colors.
    pub shade: Option<usize>,
}

impl Segment {
    fn new(text: impl Into<String>, bold: bool, shade: Option<usize>) -> Self {
        Self {
            text: text.into(),
            bold,
            shade,
        }
    }
}

/// Split `text` into styled segments.
///
/// Checkerboard shading splits on `.` and shades sentences alternately; the
/// dots themselves stay unshaded. Bionic reading collapses whitespace to
/// single spaces.
pub fn decorate(text: &str, options: &DisplayOptions) -> Vec<Segment> {
    let sentences: Vec<&str> = if options.checkerboard {
        text.split('.').collect()
    } else {
        vec![text]
    };

    let mut segments = Vec::new();
    for (k, sentence) in sentences.into_iter().enumerate() {
        if k > 0 {
            segments.push(Segment::new(".", false, None));
        }
        let shade = options.checkerboard.then_some(k % 2);
        if !options.bionic_reading {
            segments.push(Segment::new(sentence, false, shade));
            continue;
        }
        for (w, word) in sentence.split_whitespace().enumerate() {
            if w > 0 {
                segments.push(Segment::new(" ", false, shade));
            }
            if word.chars().count() > options.bionic_min_word_length {
                let split = word
                    .char_indices()
                    .nth(options.bionic_first_characters)
                    .map_or(word.len(), |(i, _)| i);
                segments.push(Segment::new(&word[..split], true, shade));
                segments.push(Segment::new(&word[split..], false, shade));
            } else {
                segments.push(Segment::new(word, false, shade));
            }
        }
    }
    segments.retain(|s| !s.text.is_empty());
    segments
}

pub fn to_plain(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Render segments with ANSI bold and 24-bit background escapes.
/// Unparsable colors leave the shade out.
pub fn to_ansi(segments: &[Segment], colors: &[String; 2]) -> String {
    let colors = [parse_color(&colors[0]), parse_color(&colors[1])];
    let mut out = String::new();
    for segment in segments {
        let background = segment.shade.and_then(|k| colors[k % 2]);
        let styled = segment.bold || background.is_some();
        if segment.bold {
            out.push_str("\x1b[1m");
        }
        if let Some((r, g, b)) = background {
            out.push_str(&format!("\x1b[48;2;{r};{g};{b}m"));
        }
        out.push_str(&segment.text);
        if styled {
            out.push_str("\x1b[0m");
        }
    }
    out
}
