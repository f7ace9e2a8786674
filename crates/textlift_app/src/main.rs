mod cli;
mod config;
mod console;
mod effects;
mod input;
mod render;
mod session;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use textlift_core::Msg;
use textlift_engine::{EngineHandle, TesseractFactory};
use textlift_logging::{lift_info, lift_warn};

use crate::cli::Cli;
use crate::effects::EffectRunner;
use crate::render::Terminal;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = config::load(&cli.config);
    let mut config = loaded.config;
    cli.apply(&mut config);

    textlift_logging::initialize(config.log.into(), config.level_filter());
    if let Some(warning) = loaded.warning {
        lift_warn!("{}", warning);
    }
    lift_info!("textlift starting, language={}", config.language);

    let factory = Arc::new(TesseractFactory::new(config.tesseract.clone()));
    let engine = EngineHandle::new(factory, config.engine_settings())
        .context("failed to start engine runtime")?;
    let mut session = Session::new(EffectRunner::new(engine), Terminal::stdio());

    if !cli.paths.is_empty() {
        session.dispatch(Msg::FilesSelected(input::read_selection(&cli.paths)));
    }

    if cli.paths.is_empty() || cli.interactive {
        return console::run(&mut session, cli.output.as_deref());
    }

    session.dispatch(Msg::ExtractClicked);
    session.run_until_idle();
    if let Some(message) = session.view().notification {
        bail!(message);
    }
    if let Some(target) = &cli.output {
        session.export(target)?;
    }
    Ok(())
}
