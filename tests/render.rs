use shline::{Config, EditorRuntime, Renderer, Session, TermCaps};

mod support;
use support::mock_completer::WordList;
use support::{Harness, contains};

fn narrow(caps: TermCaps) -> Harness {
    Harness::with_terminal(Config::default(), caps, (10, 24))
}

fn with_right_prompt(config: Config, right: &str) -> Harness {
    let rt = EditorRuntime::new(config);
    let mut renderer = Renderer::new(TermCaps::ansi(), (20, 24), &rt.config);
    renderer.set_prompt("$ ", right);
    let session = Session::new(&rt, renderer);
    Harness { rt, session }
}

#[test]
fn test_first_paint_shows_prompt_and_text() {
    let mut h = Harness::new();
    h.keys("echo");
    let out = h.render();
    assert!(out.starts_with(b"\r"));
    assert!(contains(&out, b"$ echo"));
}

#[test]
fn test_unchanged_state_sends_nothing() {
    let mut h = Harness::new();
    h.keys("abc");
    assert!(!h.render().is_empty());
    assert!(h.render().is_empty());
}

#[test]
fn test_appending_sends_only_the_new_text() {
    let mut h = Harness::new();
    h.keys("abc");
    h.render();
    h.keys("d");
    assert_eq!(h.render(), b"d\x1b[K");
}

#[test]
fn test_deleting_clears_the_tail() {
    let mut h = Harness::new();
    h.keys("abcd");
    h.render();
    h.keys("\x7f");
    let out = h.render();
    assert!(out.ends_with(b"\x1b[K"));
    assert!(!contains(&out, b"abc"));
}

#[test]
fn test_full_line_nudges_cursor_onto_next_line() {
    let mut h = narrow(TermCaps::ansi());
    h.keys("abcdefgh");
    let out = h.render();
    assert!(out.ends_with(b" \r\x1b[K"));
}

#[test]
fn test_full_line_without_glitch_wraps_by_itself() {
    let mut h = narrow(TermCaps::ansi().difference(TermCaps::EAT_NEWLINE_GLITCH));
    h.keys("abcdefgh");
    let out = h.render();
    assert!(out.ends_with(b"h"));
    assert!(!contains(&out, b" \r"));
}

#[test]
fn test_right_prompt() {
    let mut h = with_right_prompt(Config::default(), "RP");
    h.keys("ls");
    assert!(contains(&h.render(), b"RP"));

    // Dropped when the text reaches it.
    let mut h = with_right_prompt(Config::default(), "RP");
    h.keys("0123456789abcdef");
    assert!(!contains(&h.render(), b"RP"));

    let forced = Config::builder().force_right_prompt(true).build();
    let mut h = with_right_prompt(forced, "RP");
    h.keys("0123456789abcdef");
    assert!(contains(&h.render(), b"RP"));
}

#[test]
fn test_candidates_are_listed_and_highlighted() {
    let mut h = Harness::new();
    h.rt.set_completer(WordList::new(&["echo", "exit", "export"]));
    h.keys("e\t");
    let out = h.render();
    for word in ["echo", "exit", "export"] {
        assert!(contains(&out, word.as_bytes()));
    }
    assert!(!contains(&out, b"\x1b[7m"));

    h.keys("\x0e");
    let out = h.render();
    assert!(contains(&out, b"\x1b[7mecho"));

    // Closing the list erases it.
    h.keys(" ");
    let out = h.render();
    assert!(contains(&out, b"\x1b[J"));
    assert!(h.session.renderer().layout().is_none());
}

#[test]
fn test_alert_rings_bell() {
    let mut h = Harness::new();
    h.keys("a").esc().keys("h");
    assert!(h.render().ends_with(b"\x07"));
    assert!(!h.take_alert());

    let mut h = Harness::with_terminal(
        Config::default(),
        TermCaps::ansi().difference(TermCaps::BELL),
        (80, 24),
    );
    h.keys("a").esc().keys("h");
    assert!(!contains(&h.render(), b"\x07"));
}

#[test]
fn test_search_status_line() {
    let mut h = Harness::new();
    h.keys("ab").esc().keys("/ec");
    assert!(contains(&h.render(), b"/ec"));

    let mut h = Harness::emacs();
    h.keys("\x12");
    assert!(contains(&h.render(), b"bck-i-search: "));
}

#[test]
fn test_control_chars_are_escaped() {
    let mut h = Harness::new();
    h.keys("\x16\x01");
    assert_eq!(h.text(), "\x01");
    assert!(contains(&h.render(), b"$ ^A"));
}

#[test]
fn test_clear_screen_repaints() {
    let mut h = Harness::emacs();
    h.keys("ls");
    h.render();
    h.keys("\x0c");
    let out = h.render();
    assert!(out.starts_with(b"\x1b[2J"));
    assert!(contains(&out, b"$ ls"));
}

#[test]
fn test_resize_repaints_everything() {
    let mut h = Harness::new();
    h.keys("abc");
    h.render();
    h.session.resize((40, 24));
    let out = h.render();
    assert!(contains(&out, b"$ abc"));
    assert_eq!(h.session.renderer().width(), 40);
}

#[test]
fn test_finish_moves_below_the_line() {
    let mut h = Harness::new();
    h.keys("ls");
    h.render();
    let mut out = Vec::new();
    h.session.finish(&mut out).unwrap();
    assert_eq!(out, b"\r\n");

    // The next paint starts over from the new line.
    assert!(h.render().starts_with(b"\r"));
}
