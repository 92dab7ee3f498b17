use {
    crate::error::Error,
    config::{Config, Environment, File},
    serde::de::DeserializeOwned,
    std::path::Path,
};

/// Prefix of the environment variables that override config keys.
pub const ENV_PREFIX: &str = "LENDKIT";

/// Load a TOML file, let `LENDKIT_`-prefixed environment variables override
/// individual keys, and deserialize the result.
///
/// Nested keys are reached with a double underscore:
/// `LENDKIT_DISPLAY__PLACEHOLDER_ON_ERROR` overrides `placeholder_on_error`
/// under `[display]`. Unprefixed variables such as `DISPLAY` are ignored.
pub fn parse_config<P, D>(path: P) -> Result<D, Error>
where
    P: AsRef<Path>,
    D: DeserializeOwned,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let config = Config::builder()
        .add_source(File::from(path))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

// ----------------------------------- tests -----------------------------------
