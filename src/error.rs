use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input ASM not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("line {line}: cannot parse `{token}` as {expected}")]
    Format {
        line: usize,
        token: String,
        expected: &'static str,
    },
    #[error("invalid label prefix `{0}`")]
    InvalidLabelPrefix(String),
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
