//! Inline help integration tests
//!
//! Queries flow through the command registry exactly as typed lines do.

use yanshell::ext;
use yanshell::shell::{
    ClassDocs, CommandOutcome, CommandRegistry, OptionRegistry, ShellContext, Value,
};

fn setup() -> (CommandRegistry, ShellContext) {
    let mut options = OptionRegistry::new();
    let mut commands = CommandRegistry::new();
    ext::install_defaults(&mut options, &mut commands).unwrap();
    (commands, ShellContext::new())
}

fn dispatch_text(
    commands: &mut CommandRegistry,
    ctx: &mut ShellContext,
    line: &str,
) -> String {
    match commands.dispatch(line, ctx) {
        Some(CommandOutcome::Text(text)) => text,
        other => panic!("expected text outcome for {:?}, got {:?}", line, other),
    }
}

#[test]
fn test_prototype_query_through_registry() {
    let (mut commands, mut ctx) = setup();
    let text = dispatch_text(&mut commands, &mut ctx, "? strlen()");
    assert!(text.contains("Returns the length of the given string."));
    assert!(text.contains("@param  string $string"));
    assert!(text.contains("@return int"));
}

#[test]
fn test_unknown_function_through_registry() {
    let (mut commands, mut ctx) = setup();
    let text = dispatch_text(&mut commands, &mut ctx, "? nonexistentFunc()");
    assert_eq!(text, "no help found for 'nonexistentFunc()'");
}

#[test]
fn test_bare_question_mark_requests_help_screen() {
    let (mut commands, mut ctx) = setup();
    match commands.dispatch("?", &mut ctx) {
        Some(CommandOutcome::Help) => {}
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_object_queries_use_live_variables() {
    let (mut commands, mut ctx) = setup();
    let mut docs = ClassDocs {
        doc: Some("A mail message.".to_string()),
        ..ClassDocs::default()
    };
    docs.methods
        .insert("deliver".to_string(), "Deliver the message.".to_string());
    ctx.load_class("Mail", docs);
    ctx.define_var("m", Value::Object { class: "Mail".into() });

    assert_eq!(
        dispatch_text(&mut commands, &mut ctx, "? $m->deliver()"),
        "Deliver the message."
    );
    assert_eq!(dispatch_text(&mut commands, &mut ctx, "? $m"), "A mail message.");
    assert_eq!(
        dispatch_text(&mut commands, &mut ctx, "? Mail"),
        "A mail message."
    );
}

#[test]
fn test_question_mark_lines_never_reach_the_evaluator() {
    let (mut commands, mut ctx) = setup();
    // Even a garbage query is answered by the help command, not evaluated
    let text = dispatch_text(&mut commands, &mut ctx, "? @!garbage");
    assert!(text.starts_with("no help found"));
}
