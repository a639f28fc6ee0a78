use std::fs;

use crate::compiler::{CommandRunner, CompilerCommand};
use crate::error::BuildError;
use crate::shader::{BuildLayout, SHADERS, ShaderEntry};

/// Compiles every entry of [`SHADERS`] in order, stopping at the first
/// failing compiler invocation.
pub struct BuildDriver<R> {
    runner: R,
    layout: BuildLayout,
}

impl<R: CommandRunner> BuildDriver<R> {
    pub fn new(runner: R) -> Self {
        Self::with_layout(runner, BuildLayout::default())
    }

    pub fn with_layout(runner: R, layout: BuildLayout) -> Self {
        Self { runner, layout }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn run(&mut self) -> Result<(), BuildError> {
        self.ensure_output_directory()?;

        log::info!("Building Shaders...");
        for entry in SHADERS.iter() {
            self.build_shader(entry)?;
        }

        log::info!(
            "Built {} shaders into {}",
            SHADERS.len(),
            self.layout.output_directory.display()
        );
        Ok(())
    }

    fn ensure_output_directory(&self) -> Result<(), BuildError> {
        let dir = &self.layout.output_directory;
        if dir.is_dir() {
            return Ok(());
        }

        log::debug!("Creating output directory {}", dir.display());
        fs::create_dir_all(dir).map_err(|source| BuildError::DirectoryCreationFailure {
            path: dir.clone(),
            source,
        })
    }

    fn build_shader(&mut self, entry: &ShaderEntry) -> Result<(), BuildError> {
        let source = self.layout.source_path(entry);
        let destination = self.layout.output_path(entry);
        log::info!(
            "- Compiling Shader: {} => {}",
            source.display(),
            destination.display()
        );

        // glslc truncates the destination itself.
        if destination.exists() {
            log::info!("\tOverwriting existing file: \"{}\"", destination.display());
        }

        let command = CompilerCommand::glslc(&source, &destination);
        log::info!("\tCMD: \"{}\"", command);

        #[cfg(feature = "tracing")]
        let _span = tracy_client::span!("compile_shader");

        match self.runner.run(&command)? {
            Some(0) => Ok(()),
            code => Err(BuildError::BuildFailure {
                command: command.to_string(),
                code,
            }),
        }
    }
}
