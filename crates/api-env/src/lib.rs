use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 48002;

pub fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

// `#[serde(flatten)]` hands envy's raw strings through untyped, so numeric
// fields in flattened blocks have to parse themselves.
pub fn string_to_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

pub fn string_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

#[derive(Clone, Default, Deserialize)]
pub struct SarvamEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub sarvam_api_key: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub sarvam_api_base: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct ServerEnv {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "string_to_u16")]
    pub port: u16,
}

impl Default for ServerEnv {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Clone, Default, Deserialize)]
pub struct SentryEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub sentry_dsn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let env: SarvamEnv = envy::from_iter(vars(&[("SARVAM_API_KEY", "   ")])).unwrap();
        assert!(env.sarvam_api_key.is_none());
    }

    #[test]
    fn test_api_key_present() {
        let env: SarvamEnv = envy::from_iter(vars(&[("SARVAM_API_KEY", "sk_test")])).unwrap();
        assert_eq!(env.sarvam_api_key.as_deref(), Some("sk_test"));
    }

    #[test]
    fn test_server_defaults() {
        let env: ServerEnv = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(env.host, DEFAULT_HOST);
        assert_eq!(env.port, DEFAULT_PORT);
    }

    #[test]
    fn test_server_port_parses_from_string() {
        let env: ServerEnv = envy::from_iter(vars(&[("PORT", "9000")])).unwrap();
        assert_eq!(env.port, 9000);
    }

    #[test]
    fn test_server_port_rejects_garbage() {
        let result: Result<ServerEnv, _> = envy::from_iter(vars(&[("PORT", "nope")]));
        assert!(result.is_err());
    }
}
