use shline::{ModeId, Status};

mod support;
use support::Harness;

fn emacs(text: &str) -> Harness {
    let mut h = Harness::emacs();
    h.keys(text);
    h
}

#[test]
fn test_starts_in_emacs_mode() {
    let h = Harness::emacs();
    assert_eq!(h.mode(), ModeId::Emacs);
}

#[test]
fn test_cursor_motions() {
    let mut h = emacs("hello big world");
    h.keys("\x01");
    assert_eq!(h.cursor(), 0);
    h.keys("\x1bf");
    assert_eq!(h.cursor(), 5);
    h.keys("\x1bf");
    assert_eq!(h.cursor(), 9);
    h.keys("\x1bb");
    assert_eq!(h.cursor(), 6);
    h.keys("\x05");
    assert_eq!(h.cursor(), 15);
    h.keys("\x06");
    assert!(h.take_alert());
    h.keys("\x02\x02");
    assert_eq!(h.cursor(), 13);
}

#[test]
fn test_find_char() {
    let mut h = emacs("a,b,c");
    h.keys("\x01\x1d,");
    assert_eq!(h.cursor(), 1);
    assert_eq!(h.mode(), ModeId::Emacs);
}

#[test]
fn test_transpose_chars() {
    let mut h = emacs("abc");
    h.keys("\x14");
    assert_eq!(h.text(), "acb");
    assert_eq!(h.cursor(), 3);
    h.keys("\x01\x06\x14");
    assert_eq!(h.text(), "cab");
    assert_eq!(h.cursor(), 2);
    h.keys("\x01\x14");
    assert!(h.take_alert());
}

#[test]
fn test_transpose_words() {
    let mut h = emacs("foo bar");
    h.keys("\x1bt");
    assert_eq!(h.text(), "bar foo");
    assert_eq!(h.cursor(), 7);
}

#[test]
fn test_word_case() {
    let mut h = emacs("foo bar");
    h.keys("\x01\x1bu");
    assert_eq!(h.text(), "FOO bar");
    assert_eq!(h.cursor(), 3);

    let mut h = emacs("HELLO WORLD");
    h.keys("\x01\x1bl");
    assert_eq!(h.text(), "hello WORLD");

    let mut h = emacs("hello world");
    h.keys("\x01\x1bc");
    assert_eq!(h.text(), "Hello world");
    assert_eq!(h.cursor(), 5);
    h.keys("\x1bc");
    assert_eq!(h.text(), "Hello World");
    assert_eq!(h.cursor(), 11);
}

#[test]
fn test_kill_word_and_yank() {
    let mut h = emacs("hello world");
    h.keys("\x01\x1bd");
    assert_eq!(h.text(), " world");
    assert_eq!(h.cursor(), 0);
    h.keys("\x05\x19");
    assert_eq!(h.text(), " worldhello");
    assert_eq!(h.cursor(), 11);
}

#[test]
fn test_kill_to_end_and_yank_back() {
    let mut h = emacs("hello world");
    h.keys("\x01\x06\x06\x0b");
    assert_eq!(h.text(), "he");
    h.keys("\x19");
    assert_eq!(h.text(), "hello world");
    assert_eq!(h.cursor(), 11);
}

#[test]
fn test_yank_pop_replaces_yanked_text() {
    let mut h = emacs("abc\x15xyz\x15");
    assert_eq!(h.text(), "");
    h.keys("\x19");
    assert_eq!(h.text(), "xyz");
    h.keys("\x1by");
    assert_eq!(h.text(), "abc");
    assert_eq!(h.cursor(), 3);
    assert!(!h.take_alert());
}

#[test]
fn test_yank_pop_after_other_command_alerts() {
    let mut h = emacs("abc\x15xyz");
    h.keys("\x1by");
    assert!(h.take_alert());
    assert_eq!(h.text(), "xyz");
}

#[test]
fn test_backward_kills() {
    let mut h = emacs("echo foo/bar");
    h.keys("\x17");
    assert_eq!(h.text(), "echo ");

    let mut h = emacs("foo/bar");
    h.keys("\x1b\x7f");
    assert_eq!(h.text(), "foo/");
}

#[test]
fn test_digit_argument() {
    let mut h = emacs("");
    h.keys("\x1b3x");
    assert_eq!(h.text(), "xxx");
    h.keys("\x1b1\x1b2-");
    assert_eq!(h.text(), format!("xxx{}", "-".repeat(12)));
}

#[test]
fn test_eof_or_delete() {
    let mut h = emacs("ab");
    h.keys("\x01\x04");
    assert_eq!(h.text(), "b");
    h.keys("\x04");
    assert_eq!(h.text(), "");
    assert_eq!(h.status(), Status::Editing);
    h.keys("\x04");
    assert_eq!(h.status(), Status::Eof);
}

#[test]
fn test_horizontal_space() {
    let mut h = emacs("a   b");
    h.keys("\x02\x02\x1b\\");
    assert_eq!(h.text(), "ab");
    assert_eq!(h.cursor(), 1);

    let mut h = emacs("a   b");
    h.keys("\x02\x02\x1b ");
    assert_eq!(h.text(), "a b");
    assert_eq!(h.cursor(), 2);
}

#[test]
fn test_lone_escape_stays_pending() {
    let mut h = emacs("abc");
    h.esc();
    // Escape is a meta prefix in emacs mode, even after the timeout.
    assert_eq!(h.mode(), ModeId::Emacs);
    h.keys("b");
    assert_eq!(h.cursor(), 0);
    assert_eq!(h.text(), "abc");
}

#[test]
fn test_accept_with_hash() {
    let mut h = emacs("ls");
    h.keys("\x1b#");
    assert_eq!(h.status(), Status::Accepted);
    assert_eq!(h.text(), "#ls");
}
