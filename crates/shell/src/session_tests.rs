// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::{Arc, Mutex};

use super::*;
use crate::action::Hook;
use crate::error::ShellError;
use crate::testutil::{catalog, view};
use nosh_core::Catalog;

fn session(catalog: &Catalog) -> Session<'_> {
    std::env::set_var("HOSTNAME", "r1");
    Session::new(
        catalog,
        view(catalog, "enable-view"),
        SessionOptions::default(),
    )
}

#[test]
fn empty_line_is_a_noop() {
    let catalog = catalog();
    let mut session = session(&catalog);
    assert_eq!(session.execute("   ").unwrap(), ExecOutcome::Empty);
    assert_eq!(session.state(), LineState::Ok);
}

#[test]
fn prompt_expands_view_template() {
    let catalog = catalog();
    let session = session(&catalog);
    assert_eq!(session.prompt(), "r1# ");
}

#[test]
fn abbreviated_command_switches_view() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let outcome = session.execute("conf t").unwrap();
    assert_eq!(outcome, ExecOutcome::Done { code: 0, out: None });
    assert_eq!(session.prompt(), "r1(config)# ");
    assert_eq!(session.depth(), 1);
}

#[test]
fn parameter_view_transition_carries_viewid_vars() {
    let catalog = catalog();
    let mut session = session(&catalog);
    session.execute("configure terminal").unwrap();
    session.execute("interface eth 0/1").unwrap();
    assert_eq!(session.prompt(), "r1(config-if-ethernet0/1)# ");
    assert_eq!(session.depth(), 2);
}

#[test]
fn restore_depth_returns_to_the_top_view() {
    let catalog = catalog();
    let mut session = session(&catalog);
    session.execute("configure terminal").unwrap();
    session.execute("interface vlan 7").unwrap();
    assert_eq!(session.depth(), 2);
    session.execute("end").unwrap();
    assert_eq!(session.depth(), 0);
    assert_eq!(session.prompt(), "r1# ");
}

#[test]
fn close_builtin_ends_the_session() {
    let catalog = catalog();
    let mut session = session(&catalog);
    assert_eq!(session.execute("exit").unwrap(), ExecOutcome::Closed);
}

#[test]
fn unknown_command_reports_divergence_column() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let err = session.execute("zzz now").unwrap_err();
    match err {
        ShellError::UnknownCommand { column } => assert_eq!(column, 0),
        other => panic!("expected unknown command, got {other}"),
    }
    assert_eq!(session.state(), LineState::SyntaxError);
}

#[test]
fn bad_token_reports_caret_inside_the_token() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let err = session.execute("show interface vla5x 3").unwrap_err();
    match err {
        ShellError::BadParameter { column, range } => {
            // Caret lands after the "vla" that matched the vlan item.
            assert_eq!(column, 18);
            assert_eq!(range, None);
        }
        other => panic!("expected bad parameter, got {other}"),
    }
}

#[test]
fn out_of_range_integer_names_the_range() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let err = session.execute("show interface eth 9999").unwrap_err();
    match &err {
        ShellError::BadParameter { range, .. } => {
            assert_eq!(range.as_deref(), Some("1..4096"));
        }
        other => panic!("expected bad parameter, got {other}"),
    }
    assert_eq!(err.to_string(), "Value out of range(1..4096).");
}

#[test]
fn missing_mandatory_tail_is_partial() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let err = session.execute("show").unwrap_err();
    assert!(matches!(err, ShellError::PartialCommand));
    assert_eq!(err.to_string(), "The command is not completed.");
}

#[test]
fn leftover_tokens_report_their_column() {
    let catalog = catalog();
    let mut session = session(&catalog);
    let err = session.execute("show version extra").unwrap_err();
    match err {
        ShellError::UnknownCommand { column } => assert_eq!(column, 13),
        other => panic!("expected unknown command, got {other}"),
    }
}

#[test]
fn enter_completes_partial_words_before_failing() {
    let catalog = catalog();
    let mut session = session(&catalog);
    // "conf" alone resolves via word-by-word completion.
    let outcome = session.execute("conf").unwrap();
    assert_eq!(outcome, ExecOutcome::Done { code: 0, out: None });
    assert_eq!(session.depth(), 1);
}

#[test]
fn log_hook_receives_the_canonical_line() {
    let catalog = catalog();
    let lines: Arc<Mutex<Vec<(String, i32)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);

    let mut session = session(&catalog);
    session.set_hooks(Hooks {
        config: None,
        log: Some(Hook {
            callback: Box::new(move |line: &str, code| {
                sink.lock().unwrap().push((line.to_string(), code));
                0
            }),
            permanent: false,
        }),
    });

    session.execute("show int eth 10").unwrap();
    let logged = lines.lock().unwrap();
    assert_eq!(
        logged.as_slice(),
        &[("show interface ethernet 10".to_string(), 0)]
    );
}

#[test]
fn dry_run_suppresses_scripts_and_transient_hooks() {
    let catalog = catalog();
    let calls: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&calls);

    let mut session = Session::new(
        &catalog,
        view(&catalog, "enable-view"),
        SessionOptions {
            dry_run: true,
            ..SessionOptions::default()
        },
    );
    session.set_hooks(Hooks {
        config: None,
        log: Some(Hook {
            callback: Box::new(move |_: &str, _| {
                *sink.lock().unwrap() += 1;
                0
            }),
            permanent: false,
        }),
    });

    session.execute("show version").unwrap();
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn script_action_output_is_captured() {
    let catalog = nosh_core::Schema::parse(
        r#"
[view.v]
prompt = "> "
[[view.v.command]]
name = "greet"
action = { script = "echo hello; exit 3", lock = false }
"#,
    )
    .unwrap();
    let mut session = Session::new(
        &catalog,
        catalog.find_view("v").unwrap(),
        SessionOptions::default(),
    );
    match session.execute("greet").unwrap() {
        ExecOutcome::Done { code, out } => {
            assert_eq!(code, 3);
            assert_eq!(out.as_deref(), Some("hello\n"));
        }
        other => panic!("expected a finished action, got {other:?}"),
    }
    assert_eq!(session.state(), LineState::ScriptError);
}

#[test]
fn script_sees_expanded_bindings() {
    let catalog = nosh_core::Schema::parse(
        r#"
[ptype.STATE]
method = "select"
pattern = "on(1) off(0)"
[view.v]
prompt = "> "
[[view.v.command]]
name = "power"
action = { script = "echo state=${state}", lock = false }
[[view.v.command.param]]
name = "state"
ptype = "STATE"
"#,
    )
    .unwrap();
    let mut session = Session::new(
        &catalog,
        catalog.find_view("v").unwrap(),
        SessionOptions::default(),
    );
    match session.execute("power on").unwrap() {
        ExecOutcome::Done { code, out } => {
            assert_eq!(code, 0);
            assert_eq!(out.as_deref(), Some("state=1\n"));
        }
        other => panic!("expected a finished action, got {other:?}"),
    }
}

#[test]
fn errors_recover_to_the_prompt() {
    let catalog = catalog();
    let mut session = session(&catalog);
    assert!(session.execute("bogus").is_err());
    // The session still serves the next line.
    assert_eq!(
        session.execute("conf t").unwrap(),
        ExecOutcome::Done { code: 0, out: None }
    );
}
