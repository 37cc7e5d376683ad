use shline::ModeId;

mod support;
use support::Harness;

#[test]
fn test_typed_text_is_one_undo_step() {
    let mut h = Harness::new();
    h.keys("abc").esc();
    assert_eq!(h.cursor(), 2);
    h.keys("u");
    assert_eq!(h.text(), "");
    assert_eq!(h.cursor(), 0);
    // Cancelling the undo brings back text and cursor.
    h.keys("\x12");
    assert_eq!(h.text(), "abc");
    assert_eq!(h.cursor(), 2);
}

#[test]
fn test_undo_steps_through_edits() {
    let mut h = Harness::new();
    h.keys("abc").esc().keys("xx");
    assert_eq!(h.text(), "a");
    h.keys("u");
    assert_eq!(h.text(), "ab");
    h.keys("u");
    assert_eq!(h.text(), "abc");
    h.keys("\x12");
    assert_eq!(h.text(), "ab");
    h.keys("U");
    assert_eq!(h.text(), "");
    // Nothing older.
    h.keys("u");
    assert!(h.take_alert());
    assert_eq!(h.text(), "");
}

#[test]
fn test_cancel_undo_at_newest_alerts() {
    let mut h = Harness::new();
    h.keys("abc").esc().keys("\x12");
    assert!(h.take_alert());
    assert_eq!(h.text(), "abc");
}

#[test]
fn test_undo_with_count() {
    let mut h = Harness::new();
    h.keys("one two three").esc().keys("0dwdw");
    assert_eq!(h.text(), "three");
    h.keys("2u");
    assert_eq!(h.text(), "one two three");
}

#[test]
fn test_new_edit_discards_redo_entries() {
    let mut h = Harness::emacs();
    h.keys("foo bar\x17");
    assert_eq!(h.text(), "foo ");
    h.keys("\x1f");
    assert_eq!(h.text(), "foo bar");
    assert_eq!(h.cursor(), 7);
    h.keys("x");
    assert_eq!(h.text(), "foo barx");
    h.keys("\x1f");
    assert_eq!(h.text(), "foo bar");
    h.keys("\x1f");
    assert_eq!(h.text(), "");
    h.keys("\x1f");
    assert!(h.take_alert());
}

#[test]
fn test_emacs_undo_all() {
    let mut h = Harness::emacs();
    h.keys("foo\x17bar\x17baz");
    assert_eq!(h.text(), "baz");
    h.keys("\x1br");
    assert_eq!(h.text(), "");
    assert_eq!(h.mode(), ModeId::Emacs);
}

#[test]
fn test_undo_after_mode_switch() {
    let mut h = Harness::new();
    h.keys("abc").esc().keys("a").keys("def").esc();
    assert_eq!(h.text(), "abcdef");
    h.keys("u");
    assert_eq!(h.text(), "abc");
    h.keys("u");
    assert_eq!(h.text(), "");
}
