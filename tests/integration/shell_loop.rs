//! Shell loop integration tests
//!
//! Feeds lines to the shell as if typed and observes extension and
//! context state.

use yanshell::shell::{Flow, Shell, Value};
use yanshell::util::config::UserConfig;

fn shell() -> Shell<yanshell::shell::ScratchBackend> {
    Shell::new(UserConfig::default()).unwrap()
}

#[test]
fn test_quit_commands_exit() {
    assert_eq!(shell().feed(":quit"), Flow::Exit);
    assert_eq!(shell().feed(":q"), Flow::Exit);
}

#[test]
fn test_set_through_alias_reaches_extension() {
    let mut shell = shell();
    shell.feed(":set bg=light");
    assert_eq!(shell.extensions().colour.borrow().active(), "light");
}

#[test]
fn test_unknown_option_changes_nothing() {
    let mut shell = shell();
    shell.feed(":set nosuchoption=1");
    // Every extension still at defaults
    assert!(!shell.extensions().autoload.borrow().enabled());
    assert!(!shell.extensions().exec_time.borrow().enabled());
    assert_eq!(shell.extensions().colour.borrow().active(), "plain");
}

#[test]
fn test_verbose_one_shot_consumed_by_next_value() {
    let mut shell = shell();
    shell.feed(":set verbose");
    assert_eq!(
        shell.extensions().verbose.borrow().mode(),
        yanshell::ext::VerboseMode::Once
    );

    shell.feed("$x = 1");
    // The one-shot was consumed while printing the value
    assert_eq!(
        shell.extensions().verbose.borrow().mode(),
        yanshell::ext::VerboseMode::Off
    );
}

#[test]
fn test_autoload_flow_end_to_end() {
    let mut shell = shell();
    shell.feed(":set autoloaddebug=on");
    shell.feed(":set autoload");
    shell.feed("$w = new Widget");

    assert_eq!(shell.context().var_class("w"), Some("Widget"));
    assert!(shell.context().class_loaded("Widget"));
    // Load depth is back to zero after the paired enter/leave
    assert_eq!(shell.extensions().autoload_debug.borrow().depth(), 0);
}

#[test]
fn test_exec_time_invariant_after_eval() {
    let mut shell = shell();
    shell.feed(":set exectime=on");
    shell.feed("$x = 42");

    let et = shell.extensions().exec_time.borrow();
    assert!(et.parse_time() >= et.exec_time());
    assert!(et.exec_time() >= 0.0);
}

#[test]
fn test_multiline_chunk_is_buffered_until_balanced() {
    let mut shell = shell();
    assert_eq!(shell.feed("$x = ("), Flow::Continue);
    assert_eq!(shell.context().var("x"), None);
    shell.feed(")");
    // Chunk was handed to the backend once balanced (it rejects the
    // parenthesized form, so no binding appears)
    assert_eq!(shell.context().var("x"), None);
}

#[test]
fn test_values_round_trip_through_context() {
    let mut shell = shell();
    shell.feed("$n = 42");
    shell.feed("$f = 2.5");
    shell.feed("$s = 'hello'");
    shell.feed("$b = true");

    assert_eq!(shell.context().var("n"), Some(&Value::Int(42)));
    assert_eq!(shell.context().var("f"), Some(&Value::Float(2.5)));
    assert_eq!(shell.context().var("s"), Some(&Value::Str("hello".into())));
    assert_eq!(shell.context().var("b"), Some(&Value::Bool(true)));
}
