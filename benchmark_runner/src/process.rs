//!
//! The external program invocation utilities.
//!

use std::process::Command;

///
/// Runs the command to completion and returns its standard output.
///
/// Fails if the program cannot be spawned or exits unsuccessfully.
///
pub fn run(command: &mut Command) -> anyhow::Result<String> {
    let program = name(command);
    tracing::debug!(%program, arguments = ?command.get_args().collect::<Vec<_>>(), "running");

    let output = command
        .output()
        .map_err(|error| anyhow::anyhow!("{program} subprocess spawning error: {error:?}"))?;
    if !output.status.success() {
        anyhow::bail!(
            "{program} error ({}): {}",
            output.status,
            String::from_utf8_lossy(output.stderr.as_slice())
        );
    }

    Ok(String::from_utf8_lossy(output.stdout.as_slice()).into_owned())
}

///
/// Returns the program name of the command for diagnostics.
///
pub fn name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}
