use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub model_name: String,
    /// Transient PDFs are written here before upload.
    pub output_dir: PathBuf,
    /// Forces debug-level logging for this crate, overriding `RUST_LOG`.
    pub debug: bool,
    /// `["*"]` allows any origin.
    pub cors_origins: Vec<String>,
    pub s3_bucket: String,
    /// Custom endpoint for MinIO / Supabase Storage; `None` means AWS.
    pub s3_endpoint: Option<String>,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Base URL under which uploaded objects are publicly readable.
    pub storage_public_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let s3_bucket = or_default("S3_BUCKET", "resumes");
        let s3_region = or_default("S3_REGION", "us-east-1");
        let s3_endpoint = var("S3_ENDPOINT").map(|e| e.trim_end_matches('/').to_string());
        let storage_public_url = var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|| default_public_url(s3_endpoint.as_deref(), &s3_bucket, &s3_region));

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_api_base: or_default("GEMINI_API_BASE", DEFAULT_API_BASE),
            model_name: or_default("MODEL_NAME", DEFAULT_MODEL),
            output_dir: PathBuf::from(or_default("OUTPUT_DIR", "outputs")),
            debug: var("DEBUG").is_some_and(|v| parse_flag(&v)),
            cors_origins: parse_cors_origins(var("CORS_ORIGINS").as_deref().unwrap_or("*")),
            s3_bucket,
            s3_endpoint,
            s3_region,
            aws_access_key_id: require("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            storage_public_url,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }

    /// `EnvFilter` directive for the subscriber. A bare level applies to this
    /// crate only; a full directive list in `RUST_LOG` is used as given.
    /// `DEBUG` always raises this crate to `debug`.
    pub fn log_directive(&self) -> String {
        let crate_name = env!("CARGO_PKG_NAME");
        let is_directive_list = self.rust_log.contains('=') || self.rust_log.contains(',');
        if !self.debug {
            return if is_directive_list {
                self.rust_log.clone()
            } else {
                format!("{crate_name}={}", self.rust_log)
            };
        }
        if !is_directive_list {
            return format!("{crate_name}=debug");
        }

        let forced = format!("{crate_name}=debug");
        let mut directives: Vec<&str> = self
            .rust_log
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty() && d.split('=').next() != Some(crate_name))
            .collect();
        directives.push(&forced);
        directives.join(",")
    }
}

/// Comma-separated origins; blanks are dropped and an empty list means `*`.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Path-style URL for custom endpoints, virtual-hosted AWS URL otherwise.
fn default_public_url(endpoint: Option<&str>, bucket: &str, region: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{endpoint}/{bucket}"),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
    }
}

#[cfg(test)]
impl Config {
    /// Minimal config for router and pipeline tests.
    pub fn for_tests(output_dir: PathBuf) -> Self {
        Config {
            gemini_api_key: "test-key".into(),
            gemini_api_base: DEFAULT_API_BASE.into(),
            model_name: DEFAULT_MODEL.into(),
            output_dir,
            debug: false,
            cors_origins: vec!["*".into()],
            s3_bucket: "resumes".into(),
            s3_endpoint: None,
            s3_region: "us-east-1".into(),
            aws_access_key_id: "test".into(),
            aws_secret_access_key: "test".into(),
            storage_public_url: "https://cdn.test/resumes".into(),
            port: 8080,
            rust_log: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("GEMINI_API_KEY", "g-key"),
        ("AWS_ACCESS_KEY_ID", "access"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.model_name, "gemini-2.0-flash");
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert!(!config.debug);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.s3_bucket, "resumes");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage_public_url,
            "https://resumes.s3.us-east-1.amazonaws.com"
        );
        assert_eq!(config.log_directive(), "resume_flow=info");
    }

    #[test]
    fn test_missing_required_variable() {
        let err = load(&REQUIRED[..2]).unwrap_err();
        assert!(err.to_string().contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn test_custom_endpoint_public_url_and_debug() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("S3_ENDPOINT", "http://localhost:9000/"),
            ("S3_BUCKET", "docs"),
            ("DEBUG", "True"),
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.storage_public_url, "http://localhost:9000/docs");
        assert!(config.debug);
        assert_eq!(config.log_directive(), "resume_flow=debug");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_log_directive_scopes_bare_level_to_crate() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("RUST_LOG", "warn"));
        let config = load(&vars).unwrap();
        assert_eq!(config.log_directive(), "resume_flow=warn");
    }

    #[test]
    fn test_debug_flag_overrides_rust_log() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([("RUST_LOG", "warn"), ("DEBUG", "1")]);
        assert_eq!(load(&vars).unwrap().log_directive(), "resume_flow=debug");

        let mut vars = REQUIRED.to_vec();
        vars.extend([("RUST_LOG", "tower_http=info,resume_flow=warn"), ("DEBUG", "1")]);
        assert_eq!(
            load(&vars).unwrap().log_directive(),
            "tower_http=info,resume_flow=debug"
        );
    }

    #[test]
    fn test_full_rust_log_directive_is_kept() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("RUST_LOG", "tower_http=debug,resume_flow=info"));
        assert_eq!(
            load(&vars).unwrap().log_directive(),
            "tower_http=debug,resume_flow=info"
        );
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_parse_cors_origins_empty_means_any() {
        assert_eq!(parse_cors_origins(" , "), vec!["*"]);
    }
}
