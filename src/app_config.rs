use crate::meetup::FairnessThresholds;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    groups: Groups,
    maps: Maps,
    venues: Venues,
    fairness: FairnessThresholds,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("MIDWHEREAH").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.core.store_buffer_size == 0 {
            return Err(ConfigError::Message("core.store_buffer_size must be at least 1".to_string()));
        }

        let FairnessThresholds {
            good_threshold,
            medium_threshold,
        } = self.fairness;

        if !(0.0 < medium_threshold && medium_threshold < good_threshold && good_threshold < 1.0) {
            return Err(ConfigError::Message(format!(
                "fairness thresholds must satisfy 0 < medium_threshold < good_threshold < 1, found medium {} and good {}",
                medium_threshold, good_threshold
            )));
        }

        Ok(())
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn maps(&self) -> &Maps {
        &self.maps
    }

    pub fn venues(&self) -> &Venues {
        &self.venues
    }

    pub fn fairness(&self) -> &FairnessThresholds {
        &self.fairness
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    store_buffer_size: usize,
}

impl Core {
    pub fn store_buffer_size(&self) -> usize {
        self.store_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Groups {
    directory: String,
}

impl Groups {
    pub fn directory(&self) -> &str {
        &self.directory
    }
}

#[derive(Deserialize)]
pub struct Maps {
    url: String,
    api_key: String,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    retry_ms: u64,
    retry_max_delay_ms: u64,
    max_retries: usize,
}

impl Maps {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay_ms(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

// Keeps the API key out of logs
impl std::fmt::Debug for Maps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maps")
            .field("url", &self.url)
            .field("api_key", &"***")
            .field("request_timeout", &self.request_timeout)
            .field("retry_ms", &self.retry_ms)
            .field("retry_max_delay_ms", &self.retry_max_delay_ms)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct Venues {
    default_type: String,
    search_radius_m: u32,
    max_venues: usize,
}

impl Venues {
    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    pub fn search_radius_m(&self) -> u32 {
        self.search_radius_m
    }

    pub fn max_venues(&self) -> usize {
        self.max_venues
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { store_buffer_size: 16 },
                groups: Groups {
                    directory: "groups".to_string(),
                },
                maps: Maps {
                    url: "https://maps.url".to_string(),
                    api_key: "key".to_string(),
                    request_timeout: Duration::from_secs(5),
                    retry_ms: 1,
                    retry_max_delay_ms: 5,
                    max_retries: 2,
                },
                venues: Venues {
                    default_type: "restaurant".to_string(),
                    search_radius_m: 1000,
                    max_venues: 10,
                },
                fairness: FairnessThresholds::default(),
            },
        }
    }

    pub fn maps_url(mut self, url: String) -> Self {
        self.config.maps.url = url;
        self
    }

    pub fn store_buffer_size(mut self, store_buffer_size: usize) -> Self {
        self.config.core.store_buffer_size = store_buffer_size;
        self
    }

    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.maps.max_retries = max_retries;
        self
    }

    pub fn max_venues(mut self, max_venues: usize) -> Self {
        self.config.venues.max_venues = max_venues;
        self
    }

    pub fn fairness(mut self, good_threshold: f64, medium_threshold: f64) -> Self {
        self.config.fairness = FairnessThresholds {
            good_threshold,
            medium_threshold,
        };
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
