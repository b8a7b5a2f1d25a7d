use std::path::Path;

use support_desk_widget::app::App;
use support_desk_widget::util;
use support_desk_widget::WidgetConfig;

const CONFIG_PATH: &str = "./support-widget.yml";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = WidgetConfig::load_or_default(Path::new(CONFIG_PATH))?;
    let log_path = util::log::init(&config.log_dir, config.debug)?;
    tracing::info!("logging to {}", log_path.display());

    let terminal = ratatui::init();
    let result = match App::new(&config) {
        Ok(app) => app.run(terminal).await,
        Err(e) => Err(e),
    };
    ratatui::restore();
    result
}
