use std::path::{Path, PathBuf};

pub const INPUT_DIRECTORY: &str = "resources/shaders/";
pub const OUTPUT_DIRECTORY: &str = "build/resources/shaders/";

/// One shader to compile: a source file under [`INPUT_DIRECTORY`] and the
/// name of the SPIR-V artifact written under [`OUTPUT_DIRECTORY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderEntry {
    pub source: &'static str,
    pub output: &'static str,
}

pub const SHADERS: [ShaderEntry; 2] = [
    ShaderEntry {
        source: "shader.vert",
        output: "vert.spv",
    },
    ShaderEntry {
        source: "shader.frag",
        output: "frag.spv",
    },
];

/// Where sources are read from and artifacts are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from(INPUT_DIRECTORY),
            output_directory: PathBuf::from(OUTPUT_DIRECTORY),
        }
    }
}

impl BuildLayout {
    /// The fixed layout placed under `root` instead of the working directory.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            input_directory: root.join(INPUT_DIRECTORY),
            output_directory: root.join(OUTPUT_DIRECTORY),
        }
    }

    pub fn source_path(&self, entry: &ShaderEntry) -> PathBuf {
        self.input_directory.join(entry.source)
    }

    pub fn output_path(&self, entry: &ShaderEntry) -> PathBuf {
        self.output_directory.join(entry.output)
    }
}
