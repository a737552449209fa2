use std::path::PathBuf;

use altitude_reveal::app::App;
use altitude_reveal::config::ShowConfig;
use altitude_reveal::util::log::LOGGER;
use ratatui::crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ShowConfig::load_or_default(config_path.as_deref())?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableFocusChange)?;
    let result = App::new(config).run(terminal).await;
    execute!(std::io::stdout(), DisableFocusChange)?;
    ratatui::restore();
    result
}

/// Everything traced goes to `trace.log`; stdout belongs to the terminal UI
fn init_tracing() {
    let Some(dir) = LOGGER.log_dir() else { return };
    let Ok(file) = std::fs::File::create(dir.join("trace.log")) else { return };

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
