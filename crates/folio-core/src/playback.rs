//! Typewriter playback over a fixed script.
//!
//! [`TypewriterPlayback`] is a small state machine. It never looks at a clock:
//! each [`tick`](TypewriterPlayback::tick) performs exactly one transition and
//! returns how long the caller should wait before the next one. A timer (the
//! native [`crate::timers::TimerQueue`] or a browser timeout) owns the waiting.

use crate::constants::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackPhase {
    Typing,
    HoldingLine,
    AdvancingLine,
    ResettingScript,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackMode {
    /// restart from the first line after the reset pause, forever
    Loop,
    /// stop once the last line has been revealed and held
    Once,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub line_index: usize,
    pub revealed_chars: usize,
    pub phase: PlaybackPhase,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            line_index: 0,
            revealed_chars: 0,
            phase: PlaybackPhase::Typing,
        }
    }
}

/// Delays between transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub char_delay: Duration,
    pub line_hold: Duration,
    pub reset_pause: Duration,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(CHAR_DELAY_MS),
            line_hold: Duration::from_millis(LINE_HOLD_MS),
            reset_pause: Duration::from_millis(RESET_PAUSE_MS),
        }
    }
}

/// Ordered, read-only lines of text. Lengths are counted in `char`s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn char_len(&self, index: usize) -> usize {
        self.line(index).map(|l| l.chars().count()).unwrap_or(0)
    }
}

/// Python snippet typed out in the hero's code terminal.
pub fn ml_pipeline_script() -> Script {
    Script::new([
        "import numpy as np",
        "from sklearn.ensemble import RandomForestClassifier",
        "from tensorflow import keras",
        "",
        "# Building ML pipeline",
        "def train_model(X_train, y_train):",
        "    model = RandomForestClassifier(n_estimators=100)",
        "    model.fit(X_train, y_train)",
        "    return model",
        "",
        "# Deploy to production",
        "accuracy = model.score(X_test, y_test)",
        "print(f'Model accuracy: {accuracy:.2%}')",
    ])
}

pub struct TypewriterPlayback {
    script: Script,
    timing: PlaybackTiming,
    mode: PlaybackMode,
    state: PlaybackState,
}

impl TypewriterPlayback {
    pub fn new(script: Script, timing: PlaybackTiming) -> Self {
        Self {
            script,
            timing,
            mode: PlaybackMode::Loop,
            state: PlaybackState::default(),
        }
    }

    /// Type `text` once and stop, as a single-line script.
    pub fn once(text: impl Into<String>, char_delay: Duration) -> Self {
        Self {
            script: Script::new([text.into()]),
            timing: PlaybackTiming {
                char_delay,
                line_hold: Duration::ZERO,
                reset_pause: Duration::ZERO,
            },
            mode: PlaybackMode::Once,
            state: PlaybackState::default(),
        }
    }

    pub fn with_mode(mut self, mode: PlaybackMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    /// Back to the initial state: first line, nothing revealed, typing.
    pub fn restart(&mut self) {
        self.state = PlaybackState::default();
    }

    /// The revealed prefix of the current line ("" past the end).
    pub fn current_text(&self) -> &str {
        let Some(line) = self.script.line(self.state.line_index) else {
            return "";
        };
        match line.char_indices().nth(self.state.revealed_chars) {
            Some((byte, _)) => &line[..byte],
            None => line,
        }
    }

    /// Lines fully typed before the current one.
    pub fn completed_lines(&self) -> &[String] {
        let end = self.state.line_index.min(self.script.len());
        &self.script.lines()[..end]
    }

    fn current_len(&self) -> usize {
        self.script.char_len(self.state.line_index)
    }

    fn line_complete(&self) -> bool {
        self.state.revealed_chars >= self.current_len()
    }

    fn is_last_line(&self) -> bool {
        self.state.line_index + 1 >= self.script.len()
    }

    /// Wait configured for the current phase before the next `tick`.
    pub fn delay(&self) -> Duration {
        match self.state.phase {
            PlaybackPhase::Typing if self.line_complete() => Duration::ZERO,
            PlaybackPhase::Typing => self.timing.char_delay,
            PlaybackPhase::HoldingLine => self.timing.line_hold,
            PlaybackPhase::AdvancingLine => Duration::ZERO,
            PlaybackPhase::ResettingScript => self.timing.reset_pause,
        }
    }

    /// Perform one transition.
    ///
    /// Returns the delay before the next tick is due, or `None` when a
    /// one-shot playback has finished (looping playback never finishes).
    pub fn tick(&mut self) -> Option<Duration> {
        let before = self.state.phase;
        match self.state.phase {
            PlaybackPhase::Typing => {
                if self.state.line_index >= self.script.len() {
                    // empty script: nothing to type
                    self.state.phase = PlaybackPhase::ResettingScript;
                } else if self.line_complete() {
                    self.state.phase = PlaybackPhase::HoldingLine;
                } else {
                    self.state.revealed_chars += 1;
                    if self.line_complete() {
                        self.state.phase = PlaybackPhase::HoldingLine;
                    }
                }
            }
            PlaybackPhase::HoldingLine => {
                if self.mode == PlaybackMode::Once && self.is_last_line() {
                    return None;
                }
                self.state.revealed_chars = 0;
                self.state.line_index += 1;
                self.state.phase = PlaybackPhase::AdvancingLine;
            }
            PlaybackPhase::AdvancingLine => {
                self.state.phase = if self.state.line_index >= self.script.len() {
                    PlaybackPhase::ResettingScript
                } else {
                    self.entry_phase()
                };
            }
            PlaybackPhase::ResettingScript => {
                if self.mode == PlaybackMode::Once {
                    return None;
                }
                self.state.line_index = 0;
                self.state.revealed_chars = 0;
                self.state.phase = if self.script.is_empty() {
                    PlaybackPhase::ResettingScript
                } else {
                    self.entry_phase()
                };
            }
        }
        if before != self.state.phase {
            log::trace!(
                "[typewriter] {:?} -> {:?} line={} chars={}",
                before,
                self.state.phase,
                self.state.line_index,
                self.state.revealed_chars
            );
        }
        Some(self.delay())
    }

    /// Phase entered when a line becomes current: empty lines skip typing.
    fn entry_phase(&self) -> PlaybackPhase {
        if self.current_len() == 0 {
            PlaybackPhase::HoldingLine
        } else {
            PlaybackPhase::Typing
        }
    }
}

/// Syntax tint for a line of the code terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Import,
    Definition,
    Assignment,
    Plain,
}

pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with('#') {
        LineKind::Comment
    } else if line.starts_with("import") || line.starts_with("from") {
        LineKind::Import
    } else if line.contains("def ") || line.contains("print(") {
        LineKind::Definition
    } else if line.contains('=') {
        LineKind::Assignment
    } else {
        LineKind::Plain
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalLine {
    /// 1-based line number, zero padded to two digits
    pub number: String,
    pub text: String,
    pub kind: LineKind,
}

impl TerminalLine {
    fn new(index: usize, text: &str) -> Self {
        Self {
            number: format!("{:02}", index + 1),
            text: text.to_string(),
            kind: classify_line(text),
        }
    }
}

/// What the code terminal shows: a faded tail of typed lines, the line being
/// typed, and a peek at what comes next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalView {
    pub previous: Vec<TerminalLine>,
    pub current: TerminalLine,
    pub upcoming: Vec<TerminalLine>,
}

impl TerminalView {
    pub fn snapshot(playback: &TypewriterPlayback) -> Self {
        let lines = playback.script().lines();
        let idx = playback.state().line_index;
        let first_prev = idx.saturating_sub(TERMINAL_PREVIOUS_LINES);
        let previous = (first_prev..idx.min(lines.len()))
            .map(|i| TerminalLine::new(i, &lines[i]))
            .collect();
        let upcoming = lines
            .iter()
            .enumerate()
            .skip(idx + 1)
            .take(TERMINAL_UPCOMING_LINES)
            .map(|(i, l)| TerminalLine::new(i, l))
            .collect();
        Self {
            previous,
            current: TerminalLine::new(idx, playback.current_text()),
            upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_text_respects_multibyte_chars() {
        let mut p = TypewriterPlayback::new(Script::new(["héllo"]), PlaybackTiming::default());
        p.tick();
        p.tick();
        assert_eq!(p.current_text(), "hé");
    }

    #[test]
    fn empty_script_parks_in_reset() {
        let mut p = TypewriterPlayback::new(Script::default(), PlaybackTiming::default());
        assert_eq!(p.tick(), Some(PlaybackTiming::default().reset_pause));
        assert_eq!(p.phase(), PlaybackPhase::ResettingScript);
        p.tick();
        assert_eq!(p.phase(), PlaybackPhase::ResettingScript);
        assert_eq!(p.state().line_index, 0);
    }
}
