use serde::Deserialize;

/// Default endpoint of the remote geolocation API.
pub const DEFAULT_API_URL: &str = "https://api.ipgeolocation.io/ipgeo";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Remote service settings
    pub api_key: String,
    pub api_url: String,

    // Batch input/output settings
    pub input_path: String,
    pub output_path: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            input_path: "ip_addresses.csv".to_string(),
            output_path: "geocoded_ips.csv".to_string(),
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let api_key = std::env::var("IPGEOLOCATION_API_KEY").unwrap_or_default();

    let api_url = std::env::var("IPGEOLOCATION_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let input_path = std::env::var("GEOBATCH_INPUT_PATH")
        .unwrap_or_else(|_| "ip_addresses.csv".to_string());

    let output_path = std::env::var("GEOBATCH_OUTPUT_PATH")
        .unwrap_or_else(|_| "geocoded_ips.csv".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        api_key,
        api_url,
        input_path,
        output_path,
        debug,
    })
}
