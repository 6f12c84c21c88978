//! Utilities for the deploy scripts.

use std::process::Command;

use tracing::info;

use crate::errors::ScriptError;

/// Executes a command, returning `to_err(err_msg)` if the command fails
pub(crate) fn command_success_or(
    mut cmd: Command,
    err_msg: &str,
    to_err: fn(String) -> ScriptError,
) -> Result<(), ScriptError> {
    info!("Running command: {:?}", cmd);
    if !cmd.status().map_err(|e| to_err(e.to_string()))?.success() {
        Err(to_err(String::from(err_msg)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_failing_commands_with_given_variant() {
        let err =
            command_success_or(Command::new("false"), "boom", ScriptError::ContractDeployment)
                .unwrap_err();
        assert!(matches!(err, ScriptError::ContractDeployment(msg) if msg == "boom"));
    }

    #[test]
    fn missing_binary_is_an_error() {
        let err = command_success_or(
            Command::new("definitely-not-an-installed-binary"),
            "unused",
            ScriptError::ContractCompilation,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::ContractCompilation(_)));
    }

    #[test]
    fn successful_command() {
        assert!(
            command_success_or(Command::new("true"), "unused", ScriptError::ContractCompilation)
                .is_ok()
        );
    }
}
