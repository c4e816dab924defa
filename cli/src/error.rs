use cricom_core::CricomError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("please provide a {0} to encode using parameter '--message' or '-m'")]
    MissingArgument(&'static str),

    #[error("file '{}' does already exist, use '--force' or '-f' to confirm overwriting", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("could not access file '{}'", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Codec(#[from] CricomError),
}

pub type Result<T> = std::result::Result<T, CliError>;
