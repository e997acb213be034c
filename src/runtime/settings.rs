use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("encore: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("encore: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Apply the positional `ORIGIN` argument. An override that fails
/// validation is reported and the configured origin is kept.
pub fn with_origin_override(
    mut settings: config::Settings,
    origin: Option<String>,
) -> config::Settings {
    let Some(origin) = origin else {
        return settings;
    };

    let configured = std::mem::replace(&mut settings.api.origin, origin);
    if let Err(msg) = settings.validate() {
        eprintln!("encore: invalid origin argument, using {configured}: {msg}");
        settings.api.origin = configured;
    }
    settings
}
