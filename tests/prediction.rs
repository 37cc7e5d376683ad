use shline::{Config, EditStyle, Status};

mod support;
use support::{Harness, contains};

fn predicting(lines: &[&str]) -> Harness {
    let config = Config::builder()
        .initial_mode(EditStyle::Emacs)
        .prediction(true)
        .build();
    Harness::with_history(config, lines)
}

fn shown(h: &Harness) -> String {
    h.session.state().buffer.chars().iter().collect()
}

#[test]
fn test_suggests_from_history() {
    let mut h = predicting(&["git status", "git status", "git stash"]);
    h.keys("gi");
    assert_eq!(h.text(), "gi");
    assert_eq!(shown(&h), "git status");
    assert_eq!(h.cursor(), 2);
}

#[test]
fn test_end_of_line_accepts_suggestion() {
    let mut h = predicting(&["git status"]);
    h.keys("g\x05");
    assert_eq!(h.text(), "git status");
    h.keys("\r");
    assert_eq!(h.status(), Status::Accepted);
    assert_eq!(h.text(), "git status");
}

#[test]
fn test_word_motion_accepts_part() {
    let mut h = predicting(&["git status"]);
    h.keys("gi\x1bf");
    assert_eq!(h.text(), "git");
    assert_eq!(shown(&h), "git status");
}

#[test]
fn test_accepting_drops_suggestion() {
    let mut h = predicting(&["git status"]);
    h.keys("gi\r");
    assert_eq!(h.text(), "gi");
    assert_eq!(shown(&h), "gi");
}

#[test]
fn test_typing_refreshes_suggestion() {
    let mut h = predicting(&["make test", "make install", "make install"]);
    h.keys("ma");
    assert_eq!(shown(&h), "make install");
    h.keys("ke t");
    assert_eq!(shown(&h), "make test");
    h.keys("x");
    assert_eq!(shown(&h), "make tx");
}

#[test]
fn test_no_suggestion_mid_line() {
    let mut h = predicting(&["git status"]);
    h.keys("gi\x02");
    assert_eq!(shown(&h), "gi");
}

#[test]
fn test_disabled_by_default() {
    let mut h = Harness::with_history(Config::default(), &["git status"]);
    h.keys("gi");
    assert_eq!(shown(&h), "gi");
    assert!(h.rt.predictor.is_empty());
}

#[test]
fn test_suggestion_painted_dim() {
    let mut h = predicting(&["git status"]);
    h.keys("gi");
    let out = h.render();
    assert!(contains(&out, b"\x1b[2m"));
    assert!(contains(&out, b"t status"));
}
