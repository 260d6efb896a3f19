use std::path::Path;

use anyhow::Context;
use ui8_config::Ui8Config;

/// Load `.env` and the layered config for `project_root`, then validate it.
pub fn load_config(project_root: &Path) -> anyhow::Result<Ui8Config> {
    let config = Ui8Config::load_with_dotenv(project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}
