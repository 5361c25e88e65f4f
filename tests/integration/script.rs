//! Script loading integration tests

use std::io::Write;

use yanshell::ext::LoadScript;
use yanshell::shell::{Shell, Value};
use yanshell::util::config::UserConfig;

fn write_script(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_open_tag_stripped_lines_in_order() {
    let file = write_script("<?php\necho 1;\necho 2;\n");
    let ext = LoadScript::new();

    assert_eq!(
        ext.load_script(file.path()),
        vec!["echo 1;".to_string(), "echo 2;".to_string()]
    );
}

#[test]
fn test_missing_file_is_silent_and_empty() {
    let ext = LoadScript::new();
    assert!(ext.load_script(std::path::Path::new("/no/such/file")).is_empty());
}

#[test]
fn test_replay_through_shell_defines_variables() {
    let file = write_script("#!/usr/bin/env yanshell\n$a = 1\n$b = \"two\"\n");
    let mut shell = Shell::new(UserConfig::default()).unwrap();

    shell.run_script(file.path());

    assert_eq!(shell.context().var("a"), Some(&Value::Int(1)));
    assert_eq!(shell.context().var("b"), Some(&Value::Str("two".into())));
}

#[test]
fn test_r_command_replays_script() {
    let file = write_script("$x = 7\n");
    let mut shell = Shell::new(UserConfig::default()).unwrap();

    shell.feed(&format!("r {}", file.path().display()));

    assert_eq!(shell.context().var("x"), Some(&Value::Int(7)));
}

#[test]
fn test_script_lines_can_set_options() {
    let file = write_script(":set exectime=on\n$x = 1\n");
    let mut shell = Shell::new(UserConfig::default()).unwrap();

    shell.run_script(file.path());

    assert!(shell.extensions().exec_time.borrow().enabled());
    assert_eq!(shell.context().var("x"), Some(&Value::Int(1)));
}
