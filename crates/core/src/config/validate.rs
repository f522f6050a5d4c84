use super::{types::Config, ConfigError, RecommenderBackend};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Recommend and text source timeouts are not 0
/// - Remote backend has a URL
/// - Audio template fields are not empty
/// - Journey TTL and cap are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    let recommender = &config.recommender;
    if recommender.timeout_secs == 0 {
        return Err(invalid("recommender.timeout_secs cannot be 0"));
    }
    if recommender.backend == RecommenderBackend::Remote {
        match &recommender.remote {
            None => {
                return Err(invalid(
                    "recommender.remote is required when backend = \"remote\"",
                ))
            }
            Some(remote) if remote.url.trim().is_empty() => {
                return Err(invalid("recommender.remote.url cannot be empty"))
            }
            Some(remote) if remote.timeout_secs == 0 => {
                return Err(invalid("recommender.remote.timeout_secs cannot be 0"))
            }
            Some(_) => {}
        }
    }

    if config.text_source.alquran_cloud.timeout_secs == 0 {
        return Err(invalid("text_source.timeout_secs cannot be 0"));
    }

    if config.audio.base_url.trim().is_empty() {
        return Err(invalid("audio.base_url cannot be empty"));
    }
    if config.audio.recitation_set.trim().is_empty() {
        return Err(invalid("audio.recitation_set cannot be empty"));
    }

    if config.journeys.ttl_secs == 0 {
        return Err(invalid("journeys.ttl_secs cannot be 0"));
    }
    if config.journeys.max_active == 0 {
        return Err(invalid("journeys.max_active cannot be 0"));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommender::RemoteRecommenderConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.recommender.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_remote_without_url_fails() {
        let mut config = Config::default();
        config.recommender.backend = RecommenderBackend::Remote;
        assert!(validate_config(&config).is_err());

        config.recommender.remote = Some(RemoteRecommenderConfig {
            url: "  ".to_string(),
            timeout_secs: 5,
            location_aliases: true,
        });
        assert!(validate_config(&config).is_err());

        config.recommender.remote = Some(RemoteRecommenderConfig {
            url: "http://localhost:5000/recommend".to_string(),
            timeout_secs: 5,
            location_aliases: true,
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_audio_fails() {
        let mut config = Config::default();
        config.audio.recitation_set = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_journey_limits_fail() {
        let mut config = Config::default();
        config.journeys.ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.journeys.max_active = 0;
        assert!(validate_config(&config).is_err());
    }
}
