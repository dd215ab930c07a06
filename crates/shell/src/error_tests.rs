// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn messages_match_operator_surface() {
    let err = ShellError::UnknownCommand { column: 5 };
    assert_eq!(err.to_string(), "Invalid input detected at \"^\" marker.");
    assert_eq!(err.column(), Some(5));

    let err = ShellError::BadParameter {
        column: 10,
        range: Some("1..4096".into()),
    };
    assert_eq!(err.to_string(), "Value out of range(1..4096).");

    let err = ShellError::PartialCommand;
    assert_eq!(err.to_string(), "The command is not completed.");
    assert_eq!(err.column(), None);
}

#[test]
fn exit_codes_follow_error_class() {
    assert_eq!(ShellError::ScriptError { code: 7 }.exit_code(), 2);
    assert_eq!(
        ShellError::System(std::io::Error::other("boom")).exit_code(),
        3
    );
    assert_eq!(ShellError::AmbiguousCommand.exit_code(), 4);
    assert_eq!(
        ShellError::UnknownCommand { column: 0 }.exit_code(),
        4
    );
}
