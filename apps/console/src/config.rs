use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
            request_timeout_secs: 30,
        }
    }
}

/// Defaults, overlaid by an optional `catalog.toml` in the working
/// directory, overlaid by environment variables. The `--server-url` CLI
/// flag wins over all of these (applied by the caller).
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("catalog.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("CATALOG_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };

    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        if v > 0 {
            settings.request_timeout_secs = v as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_replace_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(
            &mut settings,
            "server_url = \"http://catalog.internal:9090\"\nrequest_timeout_secs = 5\n",
        );
        assert_eq!(settings.server_url, "http://catalog.internal:9090");
        assert_eq!(settings.request_timeout_secs, 5);
    }

    #[test]
    fn unknown_keys_and_malformed_toml_keep_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, "unrelated = true\n");
        assert_eq!(settings, Settings::default());

        apply_file_overrides(&mut settings, "not valid toml [[");
        assert_eq!(settings, Settings::default());
    }

    // The only test that touches process env; the file-override tests call
    // apply_file_overrides directly so they cannot race with it.
    #[test]
    fn env_vars_override_defaults_and_app_prefix_wins() {
        std::env::set_var("CATALOG_SERVER_URL", "http://env-host:1234");
        std::env::set_var("APP__REQUEST_TIMEOUT_SECS", "7");

        let settings = load_settings();
        assert_eq!(settings.server_url, "http://env-host:1234");
        assert_eq!(settings.request_timeout_secs, 7);

        std::env::set_var("APP__SERVER_URL", "http://app-host:5678");
        let settings = load_settings();
        assert_eq!(settings.server_url, "http://app-host:5678");

        std::env::remove_var("CATALOG_SERVER_URL");
        std::env::remove_var("APP__SERVER_URL");
        std::env::remove_var("APP__REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn non_positive_timeout_is_ignored() {
        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, "request_timeout_secs = 0\n");
        assert_eq!(
            settings.request_timeout_secs,
            Settings::default().request_timeout_secs
        );
    }
}
