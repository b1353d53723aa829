//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.gsync()
        .args(&["--help"])
        .passes()
        .stdout_has("validate")
        .stdout_has("plan")
        .stdout_has("once");
}

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();

    temp.gsync()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("frobnicate");
}
