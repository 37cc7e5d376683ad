//! Interactive line editing on the controlling terminal.
//!
//! Run with: cargo run --example line_demo [-- --emacs]
//!
//! Words from a small command list complete with Tab. Type `keys NAME` to
//! list the bindings of a command, `exit` or end of input to quit.

use shline::{
    Candidate, CommandId, Completer, CompletionContext, Config, EditStyle, EditorRuntime,
    LineEditor, ReadLine, term,
};

const COMMANDS: &[(&str, &str)] = &[
    ("cd", "change directory"),
    ("echo", "print arguments"),
    ("exit", "leave the demo"),
    ("export", "set a variable"),
    ("history", "list entered lines"),
    ("keys", "show key bindings"),
];

struct Commands;

impl Completer for Commands {
    fn generate_candidates(&self, ctx: &CompletionContext<'_>) -> Vec<Candidate> {
        let word = ctx.word();
        if ctx.word_start > 0 {
            // Arguments are editing command names.
            return CommandId::all()
                .iter()
                .map(|c| c.name())
                .filter(|name| name.starts_with(&word))
                .map(Candidate::new)
                .collect();
        }
        COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(&word))
            .map(|(name, about)| Candidate::new(*name).with_description(*about))
            .collect()
    }
}

fn main() -> shline::Result<()> {
    let emacs = std::env::args().any(|arg| arg == "--emacs");
    let mut config = Config::from_env();
    if emacs {
        config.initial_mode = EditStyle::Emacs;
    }
    config.prediction = true;

    let mut runtime = EditorRuntime::new(config);
    runtime.set_completer(Commands);
    let mut editor = LineEditor::new(term::stdio(), runtime);

    loop {
        let line = match editor.read_line_with("demo$ ", "[shline]")? {
            ReadLine::Line(line) => line,
            ReadLine::Interrupted => continue,
            ReadLine::Eof => break,
        };
        let mut words = line.split_whitespace();
        match words.next() {
            Some("exit") => break,
            Some("history") => {
                for (i, entry) in editor.runtime().history.iter().enumerate() {
                    println!("{:5}  {entry}", i + 1);
                }
            }
            Some("keys") => {
                for name in words {
                    match name.parse::<CommandId>() {
                        Ok(command) => {
                            for binding in editor.runtime().describe(command) {
                                println!("{name}  {binding}");
                            }
                        }
                        Err(e) => eprintln!("{e}"),
                    }
                }
            }
            Some(_) => println!("{line}"),
            None => {}
        }
    }
    Ok(())
}
