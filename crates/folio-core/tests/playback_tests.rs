// Host-side tests for typewriter playback and the code terminal view.

use folio_core::*;
use std::time::Duration;

use PlaybackPhase::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn step(p: &mut TypewriterPlayback) -> (usize, usize, PlaybackPhase) {
    p.tick();
    let s = p.state();
    (s.line_index, s.revealed_chars, s.phase)
}

#[test]
fn script_with_empty_line_walks_every_phase() {
    let mut p = TypewriterPlayback::new(Script::new(["ab", "", "c"]), PlaybackTiming::default());
    assert_eq!(p.state(), PlaybackState::default());

    let expected = [
        (0, 1, Typing),
        (0, 2, HoldingLine),
        (1, 0, AdvancingLine),
        // empty line is held without typing
        (1, 0, HoldingLine),
        (2, 0, AdvancingLine),
        (2, 0, Typing),
        (2, 1, HoldingLine),
        (3, 0, AdvancingLine),
        (3, 0, ResettingScript),
        (0, 0, Typing),
        (0, 1, Typing),
    ];
    for (i, want) in expected.iter().enumerate() {
        assert_eq!(step(&mut p), *want, "transition {i}");
    }
}

#[test]
fn tick_returns_the_configured_delays() {
    let timing = PlaybackTiming {
        char_delay: ms(10),
        line_hold: ms(200),
        reset_pause: ms(500),
    };
    let mut p = TypewriterPlayback::new(Script::new(["ab"]), timing);
    assert_eq!(p.delay(), ms(10));
    assert_eq!(p.tick(), Some(ms(10)));
    assert_eq!(p.tick(), Some(ms(200)));
    assert_eq!(p.phase(), HoldingLine);
    assert_eq!(p.tick(), Some(Duration::ZERO));
    assert_eq!(p.phase(), AdvancingLine);
    assert_eq!(p.tick(), Some(ms(500)));
    assert_eq!(p.phase(), ResettingScript);
    assert_eq!(p.tick(), Some(ms(10)));
    assert_eq!(p.phase(), Typing);
}

#[test]
fn revealed_chars_grow_while_typing_and_reset_on_advance() {
    let mut p = TypewriterPlayback::new(ml_pipeline_script(), PlaybackTiming::default());
    let mut last = p.state();
    for _ in 0..2_000 {
        p.tick();
        let now = p.state();
        match now.phase {
            AdvancingLine => assert_eq!(now.revealed_chars, 0),
            _ if now.line_index == last.line_index && last.phase == Typing => {
                assert!(now.revealed_chars >= last.revealed_chars)
            }
            _ => {}
        }
        assert!(now.revealed_chars <= p.script().char_len(now.line_index));
        last = now;
    }
}

#[test]
fn current_text_is_a_prefix_of_the_line() {
    let script = ml_pipeline_script();
    let mut p = TypewriterPlayback::new(script.clone(), PlaybackTiming::default());
    for _ in 0..500 {
        p.tick();
        let line = script.line(p.state().line_index).unwrap_or("");
        assert!(line.starts_with(p.current_text()));
    }
}

#[test]
fn default_script_has_thirteen_lines() {
    let script = ml_pipeline_script();
    assert_eq!(script.len(), 13);
    assert_eq!(script.line(0), Some("import numpy as np"));
    assert_eq!(script.line(3), Some(""));
}

#[test]
fn once_mode_stops_after_the_text() {
    let mut p = TypewriterPlayback::once("Hi!", ms(30));
    let mut ticks = 0;
    while p.tick().is_some() {
        ticks += 1;
        assert!(ticks < 100, "one-shot playback never finished");
    }
    assert_eq!(p.current_text(), "Hi!");
    assert_eq!(p.phase(), HoldingLine);
}

#[test]
fn once_mode_over_a_script_types_every_line() {
    let mut p = TypewriterPlayback::new(Script::new(["a", "b"]), PlaybackTiming::default())
        .with_mode(PlaybackMode::Once);
    while p.tick().is_some() {}
    assert_eq!(p.state().line_index, 1);
    assert_eq!(p.completed_lines(), ["a".to_string()]);
    assert_eq!(p.current_text(), "b");
}

#[test]
fn restart_returns_to_the_first_line() {
    let mut p = TypewriterPlayback::new(Script::new(["abc", "de"]), PlaybackTiming::default());
    for _ in 0..6 {
        p.tick();
    }
    p.restart();
    assert_eq!(p.state(), PlaybackState::default());
    assert_eq!(p.current_text(), "");
}

#[test]
fn classifies_terminal_lines() {
    assert_eq!(classify_line("# Load data"), LineKind::Comment);
    assert_eq!(classify_line("import numpy as np"), LineKind::Import);
    assert_eq!(classify_line("from sklearn import svm"), LineKind::Import);
    assert_eq!(classify_line("def train(x):"), LineKind::Definition);
    assert_eq!(classify_line("print(score)"), LineKind::Definition);
    assert_eq!(classify_line("model = Model()"), LineKind::Assignment);
    assert_eq!(classify_line("model.fit(X, y)"), LineKind::Plain);
}

#[test]
fn terminal_view_windows_around_the_current_line() {
    let lines: Vec<String> = (0..10).map(|i| format!("line{i}")).collect();
    let mut p = TypewriterPlayback::new(Script::new(lines), PlaybackTiming::default());
    // advance to line 7 with two characters revealed
    while p.state().line_index < 7 {
        p.tick();
    }
    while p.phase() != Typing {
        p.tick();
    }
    p.tick();
    p.tick();
    let view = TerminalView::snapshot(&p);
    let prev: Vec<&str> = view.previous.iter().map(|l| l.number.as_str()).collect();
    assert_eq!(prev, ["03", "04", "05", "06", "07"]);
    assert_eq!(view.current.number, "08");
    assert_eq!(view.current.text, "li");
    let next: Vec<&str> = view.upcoming.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(next, ["line8", "line9"]);
}

#[test]
fn terminal_view_at_the_start_has_no_history() {
    let p = TypewriterPlayback::new(ml_pipeline_script(), PlaybackTiming::default());
    let view = TerminalView::snapshot(&p);
    assert!(view.previous.is_empty());
    assert_eq!(view.current.number, "01");
    assert_eq!(view.upcoming.len(), TERMINAL_UPCOMING_LINES);
}
