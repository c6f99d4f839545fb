use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, bail};

use crate::{model::Coordinate, open_notify::DEFAULT_BASE_URL};

/// Indianapolis
const DEFAULT_HOME: Coordinate = Coordinate::new(39.768403, -86.158068);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub iss_icon: PathBuf,
    pub world_map: PathBuf,
    /// Where rendered frames are written
    pub map_output: PathBuf,
    pub update_interval: Duration,
    pub home: Coordinate,
    pub log_dir: PathBuf,
}

impl Config {
    /// Reads the configuration from the environment, after loading `.env` if there is one
    pub fn from_env() -> anyhow::Result<Self> {
        _ = dotenvy::dotenv();

        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = lookup("ISS_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&api_base_url)
            .with_context(|| format!("ISS_API_BASE_URL {api_base_url:?} is not a URL"))?;

        let update_interval = parsed(&lookup, "ISS_UPDATE_INTERVAL_SECS", 5u64)?;
        if update_interval == 0 {
            bail!("ISS_UPDATE_INTERVAL_SECS must be at least 1");
        }

        let home = Coordinate::new(
            parsed(&lookup, "ISS_HOME_LAT", DEFAULT_HOME.latitude)?,
            parsed(&lookup, "ISS_HOME_LON", DEFAULT_HOME.longitude)?,
        );

        Ok(Config {
            api_base_url,
            iss_icon: lookup("ISS_ICON").unwrap_or("iss.gif".to_string()).into(),
            world_map: lookup("ISS_WORLD_MAP")
                .unwrap_or("map.gif".to_string())
                .into(),
            map_output: lookup("ISS_MAP_OUTPUT")
                .unwrap_or("iss_map.svg".to_string())
                .into(),
            update_interval: Duration::from_secs(update_interval),
            home,
            log_dir: lookup("ISS_LOG_DIR").unwrap_or("./logs".to_string()).into(),
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid {key} {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api_base_url, "http://api.open-notify.org");
        assert_eq!(config.iss_icon, PathBuf::from("iss.gif"));
        assert_eq!(config.world_map, PathBuf::from("map.gif"));
        assert_eq!(config.update_interval, Duration::from_secs(5));
        assert_eq!(config.home, Coordinate::new(39.768403, -86.158068));
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("ISS_API_BASE_URL", "http://localhost:8080"),
            ("ISS_UPDATE_INTERVAL_SECS", " 30 "),
            ("ISS_HOME_LAT", "45.81"),
            ("ISS_HOME_LON", "15.98"),
            ("ISS_MAP_OUTPUT", "/tmp/out.svg"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.update_interval, Duration::from_secs(30));
        assert_eq!(config.home, Coordinate::new(45.81, 15.98));
        assert_eq!(config.map_output, PathBuf::from("/tmp/out.svg"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("ISS_UPDATE_INTERVAL_SECS", "soon")]).is_err());
        assert!(config_from(&[("ISS_UPDATE_INTERVAL_SECS", "0")]).is_err());
        assert!(config_from(&[("ISS_HOME_LAT", "north")]).is_err());
        assert!(config_from(&[("ISS_API_BASE_URL", "not a url")]).is_err());
    }
}
