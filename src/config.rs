use serde::Deserialize;

/// Application configuration loaded from environment variables
///
/// The Gemini credential is deliberately absent: it is read through a
/// [`CredentialSource`](crate::services::guard::CredentialSource) on every
/// load so that reconfiguration takes effect on the next retry.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for recommendations
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// How many restaurants to ask the model for
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: u8,

    /// Name of the environment variable holding the Gemini API key
    #[serde(default = "default_api_key_var")]
    pub api_key_var: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_recommendation_count() -> u8 {
    6
}

fn default_api_key_var() -> String {
    "API_KEY".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that deserialize but cannot work
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.recommendation_count == 0 {
            anyhow::bail!("RECOMMENDATION_COUNT must be at least 1");
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.gemini_api_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.recommendation_count, 6);
        assert_eq!(config.api_key_var, "API_KEY");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("GEMINI_MODEL".to_string(), "gemini-2.0-flash".to_string()),
            ("RECOMMENDATION_COUNT".to_string(), "3".to_string()),
            ("API_KEY_VAR".to_string(), "GEMINI_API_KEY".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.recommendation_count, 3);
        assert_eq!(config.api_key_var, "GEMINI_API_KEY");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }

    #[test]
    fn test_zero_recommendation_count_rejected() {
        let vars = vec![("RECOMMENDATION_COUNT".to_string(), "0".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RECOMMENDATION_COUNT"));
    }
}
