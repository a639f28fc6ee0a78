use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("command failed, see output. `{command}` exited with {}", describe_code(.code))]
    BuildFailure { command: String, code: Option<i32> },

    #[error("shader compiler `{compiler}` not found, is it installed and on PATH?")]
    CompilerNotFound { compiler: String },

    #[error("failed to run `{command}`")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory {}", .path.display())]
    DirectoryCreationFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_failure_message_names_command_and_code() {
        let err = BuildError::BuildFailure {
            command: "glslc a -o b".to_string(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("command failed, see output."));
        assert!(msg.contains("`glslc a -o b`"));
        assert!(msg.contains("code 1"));
    }

    #[test]
    fn build_failure_without_code_mentions_signal() {
        let err = BuildError::BuildFailure {
            command: "glslc a -o b".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("signal"));
    }
}
