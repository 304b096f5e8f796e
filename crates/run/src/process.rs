//! Blocking subprocess execution with scripted standard input.
//!
//! LUMPREM and its utilities prompt for file names on standard input. Each
//! run answers every prompt up front, waits for the program to exit and
//! captures its output.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, info_span};

use crate::error::RunError;

/// Captured output of a finished program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `program` in `workdir`, writing `commands` to its standard input.
///
/// Commands are joined with newlines and terminated by one. The working
/// directory is set on the child only.
///
/// # Errors
///
/// - [`RunError::Spawn`] if the program cannot be started.
/// - [`RunError::Io`] if the commands cannot be written or output cannot be
///   collected.
/// - [`RunError::ExternalProcessFailed`] on a non-zero exit.
pub fn run_process<S: AsRef<str>>(
    program: &str,
    workdir: &Path,
    commands: &[S],
) -> Result<ProcessOutput, RunError> {
    let _span = info_span!("process", program, workdir = %workdir.display()).entered();

    let mut input = commands
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    input.push('\n');

    let mut child = Command::new(program)
        .current_dir(workdir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = write_commands(&mut stdin, &input, program)
    {
        drop(stdin);
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    let output = child.wait_with_output().map_err(|source| RunError::Io {
        program: program.to_string(),
        source,
    })?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    debug!(%stdout, "captured stdout");
    if !stderr.trim().is_empty() {
        debug!(%stderr, "captured stderr");
    }

    if !output.status.success() {
        return Err(RunError::ExternalProcessFailed {
            program: program.to_string(),
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }
    info!(n_commands = commands.len(), "process finished");
    Ok(ProcessOutput { stdout, stderr })
}

/// Writes the scripted answers. A program may exit before reading all of
/// them, so a closed pipe is not an error.
fn write_commands(stdin: &mut impl Write, input: &str, program: &str) -> Result<(), RunError> {
    match stdin.write_all(input.as_bytes()) {
        Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(RunError::Io {
            program: program.to_string(),
            source: e,
        }),
        _ => Ok(()),
    }
}

/// Runs LUMPREM on `lr_<name>.in`, producing `lr_<name>.out`.
///
/// # Errors
///
/// See [`run_process`].
pub fn run_lumprem(exe: &str, workspace: &Path, name: &str) -> Result<ProcessOutput, RunError> {
    run_process(
        exe,
        workspace,
        &[format!("lr_{name}.in"), format!("lr_{name}.out")],
    )
}

/// Runs LUMPREP on the given input file.
///
/// # Errors
///
/// See [`run_process`].
pub fn run_lumprep(exe: &str, workspace: &Path, infile: &str) -> Result<ProcessOutput, RunError> {
    run_process(exe, workspace, &[infile])
}

/// Runs `lr2series` on the given input file.
///
/// # Errors
///
/// See [`run_process`].
pub fn run_lr2series(
    exe: &str,
    workspace: &Path,
    infile: &str,
) -> Result<ProcessOutput, RunError> {
    run_process(exe, workspace, &[infile])
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct FailingStdin(ErrorKind);

    impl Write for FailingStdin {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stdin_write_failure_is_error() {
        let err = write_commands(&mut FailingStdin(ErrorKind::PermissionDenied), "x\n", "lumprem")
            .unwrap_err();
        assert!(matches!(
            err,
            RunError::Io { ref program, ref source }
                if program == "lumprem" && source.kind() == ErrorKind::PermissionDenied
        ));
    }

    #[test]
    fn closed_stdin_is_tolerated() {
        write_commands(&mut FailingStdin(ErrorKind::BrokenPipe), "x\n", "lumprem").unwrap();
    }

    #[test]
    fn commands_written_verbatim() {
        let mut buf = Vec::new();
        write_commands(&mut buf, "lr_a.in\nlr_a.out\n", "lumprem").unwrap();
        assert_eq!(buf, b"lr_a.in\nlr_a.out\n");
    }
}
