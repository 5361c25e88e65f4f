//! Option handling integration tests
//!
//! Drives the registered options through the registry, the way the `:set`
//! dispatcher does, and checks the flag/table state behind them.

use proptest::prelude::*;

use yanshell::ext::{self, VerboseMode};
use yanshell::shell::{CommandRegistry, OptionRegistry, SetOutcome, ShellContext};

fn setup() -> (OptionRegistry, CommandRegistry, ext::Extensions, ShellContext) {
    let mut options = OptionRegistry::new();
    let mut commands = CommandRegistry::new();
    let exts = ext::install_defaults(&mut options, &mut commands).unwrap();
    (options, commands, exts, ShellContext::new())
}

#[test]
fn test_autoload_is_one_way() {
    let (mut options, _commands, exts, mut ctx) = setup();

    assert_eq!(options.set("autoload", None, &mut ctx), SetOutcome::Applied);
    assert!(exts.autoload.borrow().enabled());

    // Second enable: no-op with a message, flag stays true
    match options.set("al", None, &mut ctx) {
        SetOutcome::Ignored(msg) => assert!(msg.contains("already enabled")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(exts.autoload.borrow().enabled());
}

#[test]
fn test_autoload_refuses_external_loader() {
    let (mut options, _commands, exts, mut ctx) = setup();
    ctx.install_external_loader("composer");

    match options.set("autoload", None, &mut ctx) {
        SetOutcome::Ignored(msg) => assert!(msg.contains("external")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!exts.autoload.borrow().enabled());
}

#[test]
fn test_colour_scheme_switch_via_option() {
    let (mut options, _commands, exts, mut ctx) = setup();

    assert_eq!(
        options.set("background", Some("dark"), &mut ctx),
        SetOutcome::Applied
    );
    assert_eq!(exts.colour.borrow().active(), "dark");
    assert_eq!(exts.colour.borrow().colour("value"), "\x1b[1;36m");

    // Unknown scheme: failure, active unchanged
    match options.set("bg", Some("nosuch"), &mut ctx) {
        SetOutcome::Ignored(msg) => assert!(msg.contains("nosuch")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(exts.colour.borrow().active(), "dark");
}

#[test]
fn test_verbose_modes_via_option() {
    let (mut options, _commands, exts, mut ctx) = setup();

    options.set("verbose", None, &mut ctx);
    assert_eq!(exts.verbose.borrow().mode(), VerboseMode::Once);

    options.set("verbose", Some("on"), &mut ctx);
    assert_eq!(exts.verbose.borrow().mode(), VerboseMode::Always);

    options.set("verbose", Some("off"), &mut ctx);
    assert_eq!(exts.verbose.borrow().mode(), VerboseMode::Off);
}

#[test]
fn test_exec_time_durations() {
    let (_options, _commands, exts, _ctx) = setup();
    let mut et = exts.exec_time.borrow_mut();

    et.mark_parse_start_at(10.0);
    et.mark_exec_start_at(12.0);
    et.mark_end_at(15.0);
    assert_eq!(et.parse_time(), 5.0);
    assert_eq!(et.exec_time(), 3.0);

    et.mark_parse_start_at(20.0);
    et.mark_end_at(26.0);
    assert_eq!(et.parse_time(), 6.0);
    assert_eq!(et.exec_time(), 0.0);
}

const RECOGNIZED: &[&str] = &["enable", "1", "on", "disable", "0", "off"];

proptest! {
    // Any value outside the recognized sets leaves every flag unchanged
    // and produces a usage message.
    #[test]
    fn prop_unrecognized_values_leave_flags_unchanged(value in "[a-zA-Z0-9]{1,10}") {
        prop_assume!(!RECOGNIZED.contains(&value.as_str()));

        let (mut options, _commands, exts, mut ctx) = setup();
        options.set("exectime", Some("on"), &mut ctx);
        options.set("autoloaddebug", Some("on"), &mut ctx);

        for name in ["exectime", "autoloaddebug", "verbose"] {
            let outcome = options.set(name, Some(&value), &mut ctx);
            prop_assert!(matches!(outcome, SetOutcome::Ignored(_)), "option {}", name);
        }

        prop_assert!(exts.exec_time.borrow().enabled());
        prop_assert!(exts.autoload_debug.borrow().enabled());
        prop_assert_eq!(exts.verbose.borrow().mode(), VerboseMode::Off);
        prop_assert!(!exts.autoload.borrow().enabled());
    }
}
