use anyhow::Context;
use log::LevelFilter;

use crate::compiler::ProcessRunner;
use crate::driver::BuildDriver;

mod compiler;
mod driver;
mod error;
mod logging;
mod shader;

fn main() -> anyhow::Result<()> {
    logging::init(LevelFilter::Info).context("failed to initialize logging")?;

    #[cfg(feature = "tracing")]
    let _client = tracy_client::Client::start();

    let mut driver = BuildDriver::new(ProcessRunner);
    if let Err(e) = driver.run() {
        log::error!("Shader build failed: {e}");
        return Err(e).context("failed to build shaders");
    }

    Ok(())
}
