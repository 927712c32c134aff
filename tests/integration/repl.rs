//! The REPL driven by scripted input.

use delve_runtime::editor::ScriptedEditor;
use delve_runtime::{Repl, Session, SessionConfig};

fn repl(seed: u64, coop: bool, lines: &[&str]) -> Repl<ScriptedEditor> {
    let mut config = SessionConfig::new().with_seed(seed);
    if coop {
        config = config.coop();
    }
    let session = Session::new(config).unwrap();
    Repl::with_editor(ScriptedEditor::new(lines.iter().copied()), session).without_banner()
}

#[test]
fn coop_heroes_take_turns_from_one_prompt() {
    let mut repl = repl(11, true, &["wait", "wait", "wait", "wait", "quit"]);
    repl.run().unwrap();
    // Two full rounds, then quit during the third.
    assert_eq!(repl.session().state().round(), 3);
}

#[test]
fn looking_around_is_free() {
    let mut repl = repl(11, false, &["status", "map", "help", "trace 3", "wait"]);
    repl.run().unwrap();
    // The wait round, then the round cut short by end of input.
    assert_eq!(repl.session().state().round(), 2);
    assert_eq!(repl.editor().history().len(), 5);
}
