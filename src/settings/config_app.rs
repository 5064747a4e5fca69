use std::env;

use log::warn;

pub const HOST: &str = "127.0.0.1";
pub const PROTOCOL_HTTP: &str = "http";
pub const PROTOCOL_HTTPS: &str = "https";
pub const PORT_HTTP: &str = "80";
pub const PORT_HTTPS: &str = "443";
pub const MAX_AGE: &str = "600";
pub const NAME: &str = "users_api";
pub const ALLOWED_ORIGIN: &str = "http://localhost:4250,http://127.0.0.1:4250";

#[derive(Debug, Clone)]
pub struct ConfigApp {
    pub app_host: String,
    pub app_protocol: String,
    pub app_port: usize,
    pub app_max_age: usize,
    pub app_domain: String,
    pub app_name: String,
    pub app_allowed_origin: String,
    pub app_num_workers: Option<usize>,
}

impl ConfigApp {
    pub fn init_by_env() -> Self {
        let app_host = env::var("APP_HOST").unwrap_or(HOST.to_string());
        let protocol = env::var("APP_PROTOCOL").unwrap_or("".to_string()).to_lowercase();
        #[rustfmt::skip]
        let app_protocol = if protocol == PROTOCOL_HTTPS { PROTOCOL_HTTPS.to_string() } else { PROTOCOL_HTTP.to_string() };
        #[rustfmt::skip]
        let port_default = if PROTOCOL_HTTPS == app_protocol { PORT_HTTPS } else { PORT_HTTP };
        let app_port = Self::parse_usize("APP_PORT", port_default);

        // Maximum number of seconds the results can be cached.
        let app_max_age = Self::parse_usize("APP_MAX_AGE", MAX_AGE);

        let app_domain = Self::get_domain(&app_protocol, &app_host, &app_port.to_string());

        let app_name = env::var("APP_NAME").unwrap_or(NAME.to_string());

        #[rustfmt::skip]
        let allowed_origin = if app_host == HOST { ALLOWED_ORIGIN } else { "" };
        // Cors permissions "allowed_origin" (array of values, comma delimited)
        let app_allowed_origin = env::var("APP_ALLOWED_ORIGIN").unwrap_or(allowed_origin.to_string());

        // Number of worker services. By default, it is detected automatically.
        let num_workers = env::var("APP_NUM_WORKERS").unwrap_or("".to_string());
        let app_num_workers = num_workers.parse::<usize>().ok().filter(|v| *v > 0);

        ConfigApp {
            app_host,
            app_protocol,
            app_port,
            app_max_age,
            app_domain,
            app_name,
            app_allowed_origin,
            app_num_workers,
        }
    }
    fn parse_usize(name: &str, default: &str) -> usize {
        let value = env::var(name).unwrap_or(default.to_string());
        let default_value = default.parse::<usize>().unwrap_or(0);
        value.trim().parse::<usize>().unwrap_or_else(|e| {
            warn!("{} `{}` - {}, the default value {} is used.", name, value, e, default_value);
            default_value
        })
    }
    fn get_domain(protocol: &str, host: &str, port: &str) -> String {
        format!("{}://{}:{}", protocol, host, port)
    }
}

pub fn get_test_config() -> ConfigApp {
    let app_host = HOST.to_string();
    let app_protocol = PROTOCOL_HTTP.to_string();
    let app_port = 8080;
    let app_domain = ConfigApp::get_domain(&app_protocol, &app_host, &(app_port.to_string())); // "http://127.0.0.1:8080"

    ConfigApp {
        app_host,
        app_protocol,
        app_port,
        app_max_age: 120,
        app_domain,
        app_name: "app_name".to_string(),
        app_allowed_origin: "".to_string(),
        app_num_workers: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_domain() {
        let domain = ConfigApp::get_domain(PROTOCOL_HTTPS, "example.com", PORT_HTTPS);
        assert_eq!(domain, "https://example.com:443");
    }
    #[test]
    fn test_get_test_config() {
        let config_app = get_test_config();
        assert_eq!(config_app.app_domain, "http://127.0.0.1:8080");
        assert_eq!(config_app.app_num_workers, None);
    }
}
