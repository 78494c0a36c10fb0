use std::collections::HashMap;
use std::fs;

/// Where the analyser posts document batches. The endpoint is fixed for the
/// lifetime of the app; there is no per-request override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub analyze_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analyze_url: "http://127.0.0.1:8001/analyze".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file_cfg = fs::read_to_string("analyser.toml")
        .ok()
        .and_then(|raw| toml::from_str::<HashMap<String, String>>(&raw).ok())
        .unwrap_or_default();

    settings_from(
        &file_cfg,
        std::env::var("ANALYZE_URL").ok(),
        std::env::var("APP__ANALYZE_URL").ok(),
    )
}

fn settings_from(
    file_cfg: &HashMap<String, String>,
    env_url: Option<String>,
    scoped_env_url: Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(v) = file_cfg.get("analyze_url") {
        settings.analyze_url = v.clone();
    }
    if let Some(v) = env_url {
        settings.analyze_url = v;
    }
    if let Some(v) = scoped_env_url {
        settings.analyze_url = v;
    }

    settings
}
