use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::error::BuildError;

pub const COMPILER: &str = "glslc";

const OUTPUT_FLAG: &str = "-o";

/// A program and its arguments, rendered for logs as a single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CompilerCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// `glslc <source> -o <destination>`
    pub fn glslc(source: &Path, destination: &Path) -> Self {
        Self::new(COMPILER)
            .arg(source)
            .arg(OUTPUT_FLAG)
            .arg(destination)
    }

    /// The path following `-o`, if any.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn output(&self) -> Option<&Path> {
        self.args
            .iter()
            .position(|a| a == OUTPUT_FLAG)
            .and_then(|i| self.args.get(i + 1))
            .map(Path::new)
    }
}

impl fmt::Display for CompilerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs a command to completion and reports its exit code.
///
/// `Ok(None)` means the process ended without an exit code, e.g. it was
/// killed by a signal.
pub trait CommandRunner {
    fn run(&mut self, command: &CompilerCommand) -> Result<Option<i32>, BuildError>;
}

/// Spawns real child processes. Standard output is captured and discarded,
/// standard error is inherited so compiler diagnostics reach the terminal.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &CompilerCommand) -> Result<Option<i32>, BuildError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => BuildError::CompilerNotFound {
                    compiler: command.program.to_string_lossy().into_owned(),
                },
                _ => BuildError::Launch {
                    command: command.to_string(),
                    source: e,
                },
            })?;

        let mut child = ChildGuard { child };
        let status = child.wait().map_err(|source| BuildError::Launch {
            command: command.to_string(),
            source,
        })?;

        log::debug!("`{}` exited with {}", command, status);
        Ok(status.code())
    }
}

/// Owns a spawned child and waits on it when dropped, so no exit path leaves
/// a zombie behind.
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn wait(&mut self) -> io::Result<ExitStatus> {
        // Drain stdout first, a full pipe would block the child forever.
        if let Some(mut stdout) = self.child.stdout.take() {
            io::copy(&mut stdout, &mut io::sink())?;
        }
        self.child.wait()
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        // Returns the cached status if already reaped.
        if let Err(e) = self.child.wait() {
            log::warn!("failed to wait on child process {}: {e}", self.child.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glslc_command_line_shape() {
        let cmd = CompilerCommand::glslc(
            Path::new("resources/shaders/shader.vert"),
            Path::new("build/resources/shaders/vert.spv"),
        );
        assert_eq!(
            cmd.to_string(),
            "glslc resources/shaders/shader.vert -o build/resources/shaders/vert.spv"
        );
        assert_eq!(
            cmd.output(),
            Some(Path::new("build/resources/shaders/vert.spv"))
        );
    }

    #[test]
    fn output_is_none_without_flag() {
        let cmd = CompilerCommand::new("glslc").arg("--version");
        assert_eq!(cmd.output(), None);
    }

    #[test]
    fn missing_program_is_compiler_not_found() {
        let cmd = CompilerCommand::new("definitely-not-a-shader-compiler-7f3a");
        let err = ProcessRunner.run(&cmd).unwrap_err();
        match err {
            BuildError::CompilerNotFound { compiler } => {
                assert_eq!(compiler, "definitely-not-a-shader-compiler-7f3a")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn reports_exit_codes() {
        assert_eq!(ProcessRunner.run(&CompilerCommand::new("true")).unwrap(), Some(0));
        assert_eq!(ProcessRunner.run(&CompilerCommand::new("false")).unwrap(), Some(1));

        let cmd = CompilerCommand::new("sh").arg("-c").arg("exit 7");
        assert_eq!(ProcessRunner.run(&cmd).unwrap(), Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn signal_termination_has_no_code() {
        let cmd = CompilerCommand::new("sh").arg("-c").arg("kill -9 $$");
        assert_eq!(ProcessRunner.run(&cmd).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn large_stdout_does_not_block() {
        let cmd = CompilerCommand::new("sh")
            .arg("-c")
            .arg("i=0; while [ $i -lt 20000 ]; do echo 0123456789abcdef; i=$((i+1)); done");
        assert_eq!(ProcessRunner.run(&cmd).unwrap(), Some(0));
    }
}
