use std::path::PathBuf;

use common_utils::consts;
use connector_integration::connectors::payu::{constants, transformers::PayuEnvironment};
use external_services::email::EmailSettings;
use hyperswitch_masking::Secret;

use crate::logger::config::Log;

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    pub server: Server,
    pub log: Log,
    pub application: Application,
    #[serde(default)]
    pub payu: PayuSettings,
    #[serde(default)]
    pub email: EmailSettings,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: consts::Env,
}

impl Common {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let Self { environment } = self;
        match environment {
            consts::Env::Development | consts::Env::Production | consts::Env::Sandbox => Ok(()),
        }
    }
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Public site the donor's browser is sent back to.
#[derive(Clone, serde::Deserialize, Debug)]
pub struct Application {
    pub base_url: url::Url,
}

/// Merchant credentials stay optional here so that a missing secret is
/// reported per request instead of preventing startup.
#[derive(Clone, serde::Deserialize, Debug)]
#[serde(default)]
pub struct PayuSettings {
    pub merchant_key: Option<Secret<String>>,
    pub merchant_salt: Option<Secret<String>>,
    pub environment: PayuEnvironment,
    pub product_info: String,
    pub success_path: String,
    pub failure_path: String,
}

impl Default for PayuSettings {
    fn default() -> Self {
        Self {
            merchant_key: None,
            merchant_salt: None,
            environment: PayuEnvironment::Test,
            product_info: constants::PRODUCT_INFO.to_string(),
            success_path: "/api/payu/callback".to_string(),
            failure_path: "/api/payu/callback".to_string(),
        }
    }
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration by picking it from default locations
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        config.common.validate()?;

        Ok(config)
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            // Here, it should be `set_override()` not `set_default()`.
            // "env" can't be altered by config field.
            .set_override("env", environment.to_string())
    }

    /// Config path.
    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            let config_directory: String = "config".into();
            let config_file_name = environment.config_path();

            config_path.push(workspace_path());
            config_path.push(config_directory);
            config_path.push(config_file_name);
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_files_parse() {
        for file in ["development.toml", "sandbox.toml", "production.toml"] {
            let path = workspace_path().join("config").join(file);
            let config = Config::new_with_config_path(Some(path.clone()))
                .unwrap_or_else(|error| panic!("{} failed to parse: {error}", path.display()));
            assert!(!config.payu.product_info.is_empty());
        }
    }

    #[test]
    fn payu_defaults_point_at_the_callback() {
        let payu = PayuSettings::default();
        assert_eq!(payu.environment, PayuEnvironment::Test);
        assert_eq!(payu.product_info, "Dog Adoption Donation");
        assert_eq!(payu.success_path, "/api/payu/callback");
        assert!(payu.merchant_salt.is_none());
    }

    #[test]
    fn merchant_secrets_are_masked_in_debug_output() {
        let payu = PayuSettings {
            merchant_key: Some(Secret::new("gtKFFx".to_string())),
            merchant_salt: Some(Secret::new("eCwWELxi".to_string())),
            ..PayuSettings::default()
        };
        let rendered = format!("{payu:?}");
        assert!(!rendered.contains("gtKFFx"));
        assert!(!rendered.contains("eCwWELxi"));
    }
}
