mod app;
mod config;
mod frame_loop;

use anyhow::Result;
use log::info;
use texcube_engine::device::GpuInit;
use texcube_engine::logging::{init_logging, LoggingConfig};
use texcube_engine::window::Runtime;

use crate::app::CubeDemo;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_env();
    info!(
        "texcube starting: {} cube(s), texture {}",
        config.mesh_count,
        config.texture_path.display()
    );

    let runtime = config.runtime_config();
    Runtime::run(runtime, GpuInit::default(), CubeDemo::new(config))
}
