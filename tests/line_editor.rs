use shline::{Config, EditStyle, EditorRuntime, LineEditor, ReadLine};

mod support;
use support::PROMPT;
use support::mock_terminal::MockTerminal;

fn editor(terminal: MockTerminal) -> LineEditor<MockTerminal> {
    LineEditor::new(terminal, EditorRuntime::default())
}

#[test]
fn test_reads_a_line() {
    let mut ed = editor(MockTerminal::new().input("ls -l\r"));
    let line = ed.read_line(PROMPT).unwrap();
    assert_eq!(line, ReadLine::Line("ls -l".into()));
    assert_eq!(ed.runtime().history.len(), 1);

    let term = ed.terminal();
    assert!(!term.raw);
    assert_eq!(term.raw_entered, 1);
    assert!(term.output_str().contains("$ ls -l"));
    assert!(term.output.ends_with(b"\r\n"));
}

#[test]
fn test_interrupt() {
    let mut ed = editor(MockTerminal::new().input("abc\x03"));
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Interrupted);
    assert!(ed.runtime().history.is_empty());
    assert!(!ed.terminal().raw);
}

#[test]
fn test_end_of_input() {
    let mut ed = editor(MockTerminal::new());
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Eof);

    let config = Config::builder().initial_mode(EditStyle::Emacs).build();
    let mut ed = LineEditor::new(MockTerminal::new().input("\x04"), EditorRuntime::new(config));
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Eof);
}

#[test]
fn test_escape_settles_after_pause() {
    let term = MockTerminal::new().input("ab\x1b").pause().input("0x\r");
    let mut ed = editor(term);
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Line("b".into()));
}

#[test]
fn test_history_carries_across_reads() {
    let term = MockTerminal::new().input("first\r").input("\x1b[A!\r");
    let mut ed = editor(term);
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Line("first".into()));
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Line("first!".into()));
    assert_eq!(ed.runtime().history.len(), 2);
    assert_eq!(ed.terminal().raw_entered, 2);
}

#[test]
fn test_right_prompt_is_painted() {
    let mut ed = editor(MockTerminal::new().input("pwd\r"));
    ed.read_line_with(PROMPT, "[main]").unwrap();
    assert!(ed.terminal().output_str().contains("[main]"));
}

#[test]
fn test_dumb_terminal_reads_plain_lines() {
    let mut ed = editor(MockTerminal::dumb().plain_line("make"));
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Line("make".into()));
    assert_eq!(ed.read_line(PROMPT).unwrap(), ReadLine::Eof);

    let term = ed.terminal();
    assert_eq!(term.raw_entered, 0);
    assert_eq!(term.plain_prompts, [PROMPT, PROMPT]);
    assert!(term.output.is_empty());
    assert_eq!(ed.runtime().history.get(0), Some("make"));
}
