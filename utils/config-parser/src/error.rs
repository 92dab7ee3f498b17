use {std::path::PathBuf, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
