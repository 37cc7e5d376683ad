//! Benchmarks for shline keystroke handling and repaint.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shline::{Config, EditStyle, EditorRuntime, Renderer, Session, TermCaps};
use std::time::Duration;

const PROMPT: &str = "$ ";

fn sample_history(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| format!("git commit -m 'change number {i}' --author someone{}", i % 7))
        .collect()
}

fn runtime(style: EditStyle, prediction: bool) -> EditorRuntime {
    let config = Config::builder()
        .initial_mode(style)
        .prediction(prediction)
        .build();
    let mut rt = EditorRuntime::new(config);
    for line in sample_history(500) {
        rt.record_line(&line);
    }
    rt
}

fn session(rt: &EditorRuntime) -> Session {
    let mut renderer = Renderer::new(TermCaps::ansi(), (80, 24), &rt.config);
    renderer.set_prompt(PROMPT, "");
    Session::new(rt, renderer)
}

/// Feeds `input` one byte at a time, repainting after each like the
/// terminal loop does.
fn type_and_render(rt: &mut EditorRuntime, input: &[u8]) -> usize {
    let mut session = session(rt);
    let mut out = Vec::new();
    let mut sent = 0;
    for &byte in input {
        session.feed(black_box(byte), rt);
        if session.wants_timeout() {
            session.timeout(rt);
        }
        let _ = session.render(&mut out);
        sent += out.len();
        out.clear();
    }
    sent
}

fn benchmark_typing(c: &mut Criterion) {
    let mut rt = runtime(EditStyle::Vi, false);
    let input = "echo the quick brown fox jumps over the lazy dog".as_bytes();

    c.bench_function("typing a line", |b| {
        b.iter(|| black_box(type_and_render(&mut rt, input)));
    });
}

fn benchmark_vi_editing(c: &mut Criterion) {
    let mut rt = runtime(EditStyle::Vi, false);
    let input = "one two three four five six\x1b0wwdwbcwTWO\x1b$bD~~~u".as_bytes();

    c.bench_function("vi editing commands", |b| {
        b.iter(|| black_box(type_and_render(&mut rt, input)));
    });
}

fn benchmark_emacs_editing(c: &mut Criterion) {
    let mut rt = runtime(EditStyle::Emacs, false);
    let input = "one two three four\x01\x1bf\x1bd\x05\x17\x19\x1bb\x14\x1bu\x1f".as_bytes();

    c.bench_function("emacs editing commands", |b| {
        b.iter(|| black_box(type_and_render(&mut rt, input)));
    });
}

fn benchmark_history_search(c: &mut Criterion) {
    let mut rt = runtime(EditStyle::Emacs, false);
    let input = "\x12change number 42\x12\x12\x07".as_bytes();

    c.bench_function("incremental history search", |b| {
        b.iter(|| black_box(type_and_render(&mut rt, input)));
    });
}

fn benchmark_prediction(c: &mut Criterion) {
    let mut rt = runtime(EditStyle::Emacs, true);
    let input = "git commit -m 'change".as_bytes();

    c.bench_function("typing with prediction", |b| {
        b.iter(|| black_box(type_and_render(&mut rt, input)));
    });
}

fn benchmark_wrapped_repaint(c: &mut Criterion) {
    let rt = runtime(EditStyle::Vi, false);
    let text = "x".repeat(400);

    c.bench_function("repaint of a wrapped line", |b| {
        b.iter(|| {
            let mut rt_local = EditorRuntime::new(rt.config.clone());
            let mut session = session(&rt_local);
            session.feed_bytes(text.as_bytes(), &mut rt_local);
            let mut out = Vec::new();
            let _ = session.render(&mut out);
            // Moving to the start repaints only the cursor position.
            session.feed_bytes(b"\x1b", &mut rt_local);
            session.timeout(&mut rt_local);
            session.feed_bytes(b"0", &mut rt_local);
            out.clear();
            let _ = session.render(&mut out);
            black_box(out.len())
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_typing,
              benchmark_vi_editing,
              benchmark_emacs_editing,
              benchmark_history_search,
              benchmark_prediction,
              benchmark_wrapped_repaint
}
criterion_main!(benches);
