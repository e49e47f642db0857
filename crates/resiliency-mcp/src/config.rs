use std::io;

pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
}

impl Transport {
    pub fn from_env() -> io::Result<Self> {
        let mode =
            std::env::var("RESILIENCYD_TRANSPORT").unwrap_or_else(|_| "stdio".to_string());
        match mode.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "RESILIENCYD_TRANSPORT must be stdio",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub default_customer: String,
    pub max_resources: usize,
    pub max_features: usize,
    /// Largest stdio message accepted, whether line-delimited or framed.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_customer: DEFAULT_CUSTOMER_NAME.to_string(),
            max_resources: 500,
            max_features: 200,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let default_customer = std::env::var("RESILIENCY_DEFAULT_CUSTOMER")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.default_customer);
        Self {
            default_customer,
            max_resources: env_usize(
                "RESILIENCY_MAX_RESOURCES",
                defaults.max_resources,
                1,
                10_000,
            ),
            max_features: env_usize("RESILIENCY_MAX_FEATURES", defaults.max_features, 1, 10_000),
            max_body_bytes: env_usize(
                "RESILIENCY_MAX_BODY_BYTES",
                defaults.max_body_bytes,
                1024,
                64 * 1024 * 1024,
            ),
        }
    }
}

fn env_usize(name: &str, default: usize, min: usize, max: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_usize_clamps_and_defaults() {
        std::env::set_var("RESILIENCY_TEST_LIMIT_HIGH", "50000");
        std::env::set_var("RESILIENCY_TEST_LIMIT_BAD", "many");
        assert_eq!(env_usize("RESILIENCY_TEST_LIMIT_HIGH", 10, 1, 100), 100);
        assert_eq!(env_usize("RESILIENCY_TEST_LIMIT_BAD", 10, 1, 100), 10);
        assert_eq!(env_usize("RESILIENCY_TEST_LIMIT_UNSET", 0, 1, 100), 1);
    }

    #[test]
    fn defaults_are_reasonable() {
        let config = ServerConfig::default();
        assert_eq!(config.default_customer, "Customer");
        assert!(config.max_resources >= 1);
        assert!(config.max_features >= 1);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
