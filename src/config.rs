use serde::Deserialize;

/// Default cap on inbound request bodies (1 MiB).
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Endpoint of the employee info service.
    pub employee_info_url: String,
    /// Value sent verbatim as the `Authorization` header upstream.
    pub auth_header: String,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            employee_info_url: lookup("EMPLOYEE_INFO_URL")
                .ok_or_else(|| anyhow::anyhow!("EMPLOYEE_INFO_URL environment variable required"))
                .and_then(|raw| {
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        anyhow::bail!("EMPLOYEE_INFO_URL cannot be empty");
                    }
                    let parsed = url::Url::parse(trimmed).map_err(|e| {
                        anyhow::anyhow!("EMPLOYEE_INFO_URL is not a valid URL: {}", e)
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("EMPLOYEE_INFO_URL must start with http:// or https://");
                    }
                    Ok(trimmed.to_string())
                })?,
            auth_header: lookup("AUTH_HEADER")
                .ok_or_else(|| anyhow::anyhow!("AUTH_HEADER environment variable required"))
                .and_then(|header| {
                    if header.trim().is_empty() {
                        anyhow::bail!("AUTH_HEADER cannot be empty");
                    }
                    Ok(header)
                })?,
            body_limit_bytes: match lookup("BODY_LIMIT_BYTES") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("BODY_LIMIT_BYTES must be a positive integer"))?,
                None => DEFAULT_BODY_LIMIT_BYTES,
            },
        };

        // Log without sensitive values
        tracing::debug!("Employee info URL: {}", config.employee_info_url);
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Body limit: {} bytes", config.body_limit_bytes);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("EMPLOYEE_INFO_URL", "https://upstream.example/api"),
            ("AUTH_HEADER", "Bearer TEST"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert_eq!(config.auth_header, "Bearer TEST");
    }

    #[test]
    fn test_missing_auth_header_fails() {
        let err = Config::from_lookup(lookup_from(&[(
            "EMPLOYEE_INFO_URL",
            "https://upstream.example/api",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("AUTH_HEADER"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = Config::from_lookup(lookup_from(&[
            ("EMPLOYEE_INFO_URL", "ftp://upstream.example/api"),
            ("AUTH_HEADER", "Bearer TEST"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn test_rejects_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("EMPLOYEE_INFO_URL", "https://upstream.example/api"),
            ("AUTH_HEADER", "Bearer TEST"),
            ("PORT", "99999"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
