use shline::{Config, EditStyle, ModeId};

mod support;
use support::Harness;

const LINES: &[&str] = &["echo one", "ls two", "echo three"];

fn vi() -> Harness {
    Harness::with_history(Config::default(), LINES)
}

fn emacs() -> Harness {
    let config = Config::builder().initial_mode(EditStyle::Emacs).build();
    Harness::with_history(config, LINES)
}

#[test]
fn test_history_keeps_the_new_line() {
    let mut h = vi();
    h.keys("draft").esc();
    h.keys("k");
    assert_eq!(h.text(), "echo three");
    assert_eq!(h.cursor(), 0);
    h.keys("kk");
    assert_eq!(h.text(), "echo one");
    h.keys("k");
    assert!(h.take_alert());
    h.keys("3j");
    assert_eq!(h.text(), "draft");
    h.keys("j");
    assert!(h.take_alert());
}

#[test]
fn test_arrow_history_puts_cursor_at_end() {
    let mut h = vi();
    h.keys("\x1b[A");
    assert_eq!(h.mode(), ModeId::ViInsert);
    assert_eq!(h.text(), "echo three");
    assert_eq!(h.cursor(), 10);
    h.keys("\x1b[B");
    assert_eq!(h.text(), "");
}

#[test]
fn test_oldest_and_return() {
    let mut h = vi();
    h.keys("draft").esc().keys("G");
    assert_eq!(h.text(), "echo one");
    h.keys("2G");
    assert_eq!(h.text(), "ls two");
    h.keys("gg");
    assert_eq!(h.text(), "draft");
}

#[test]
fn test_history_edits_do_not_touch_entries() {
    let mut h = vi();
    h.keys("\x1b[A").keys("!").esc();
    assert_eq!(h.text(), "echo three!");
    h.keys("k").keys("j");
    assert_eq!(h.text(), "echo three");
    assert_eq!(h.rt.history.get(2), Some("echo three"));
}

#[test]
fn test_switching_entries_resets_undo() {
    let mut h = vi();
    h.keys("draft").esc().keys("k").keys("u");
    assert!(h.take_alert());
    assert_eq!(h.text(), "echo three");
}

#[test]
fn test_emacs_history() {
    let mut h = emacs();
    h.keys("\x10");
    assert_eq!(h.text(), "echo three");
    assert_eq!(h.cursor(), 10);
    h.keys("\x1b<");
    assert_eq!(h.text(), "echo one");
    h.keys("\x1b>");
    assert_eq!(h.text(), "echo three");
    h.keys("\x0e");
    assert_eq!(h.text(), "");
}

#[test]
fn test_vi_search() {
    let mut h = vi();
    h.esc().keys("/echo");
    assert_eq!(h.mode(), ModeId::ViSearch);
    // The match is previewed while typing.
    assert_eq!(h.text(), "echo three");
    h.keys("\r");
    assert_eq!(h.mode(), ModeId::ViCommand);
    assert_eq!(h.text(), "echo three");
    assert_eq!(h.cursor(), 0);

    h.keys("n");
    assert_eq!(h.text(), "echo one");
    h.keys("n");
    assert!(h.take_alert());
    h.keys("N");
    assert_eq!(h.text(), "echo three");
}

#[test]
fn test_vi_search_empty_pattern_reuses_last() {
    let mut h = vi();
    h.esc().keys("/echo\r");
    assert_eq!(h.text(), "echo three");
    h.keys("/\r");
    assert_eq!(h.text(), "echo one");
}

#[test]
fn test_vi_search_abort_restores_line() {
    let mut h = vi();
    h.keys("draft").esc().keys("/ec");
    assert_eq!(h.text(), "echo three");
    h.esc();
    assert_eq!(h.mode(), ModeId::ViCommand);
    assert_eq!(h.text(), "draft");

    // Erasing past the start of the pattern also aborts.
    h.keys("/\x7f");
    assert_eq!(h.mode(), ModeId::ViCommand);
    assert_eq!(h.text(), "draft");
}

#[test]
fn test_vi_search_failure() {
    let mut h = vi();
    h.keys("draft").esc().keys("/zzz");
    assert!(h.take_alert());
    h.keys("\r");
    assert!(h.take_alert());
    assert_eq!(h.text(), "draft");
    assert_eq!(h.mode(), ModeId::ViCommand);
}

#[test]
fn test_emacs_incremental_search() {
    let mut h = emacs();
    h.keys("draft\x12ech");
    assert_eq!(h.mode(), ModeId::EmacsSearch);
    assert_eq!(h.text(), "echo three");
    h.keys("\x12");
    assert_eq!(h.text(), "echo one");
    h.keys("\r");
    assert_eq!(h.mode(), ModeId::Emacs);
    assert_eq!(h.text(), "echo one");
    assert_eq!(h.cursor(), 3);
}

#[test]
fn test_emacs_search_abort_and_escape() {
    let mut h = emacs();
    h.keys("draft\x12ls");
    assert_eq!(h.text(), "ls two");
    h.keys("\x07");
    assert_eq!(h.mode(), ModeId::Emacs);
    assert_eq!(h.text(), "draft");
    assert_eq!(h.cursor(), 5);

    h.keys("\x12ls").esc();
    assert_eq!(h.mode(), ModeId::Emacs);
    assert_eq!(h.text(), "ls two");
    assert_eq!(h.cursor(), 2);
}

#[test]
fn test_emacs_search_edits_pattern() {
    let mut h = emacs();
    h.keys("\x12ls");
    h.keys("\x7f\x7f");
    // An empty pattern shows the original line.
    assert_eq!(h.text(), "");
    h.keys("\x7f");
    assert!(h.take_alert());
    assert_eq!(h.mode(), ModeId::EmacsSearch);
    h.keys("one\x15");
    assert_eq!(h.text(), "");
}

#[test]
fn test_recorded_lines_next_session() {
    let mut h = vi();
    h.keys("new entry\r").next_line();
    assert_eq!(h.rt.history.len(), 4);
    h.keys("\x1b[A");
    assert_eq!(h.text(), "new entry");
}
