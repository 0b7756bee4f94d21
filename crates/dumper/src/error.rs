use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid links file {path}: {source}")]
    LinksFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid link: {0}")]
    Link(#[from] dumper_core::DumpError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::LinksFile { .. } | Self::Link(_) | Self::InvalidArgument { .. } => 2,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use dumper_core::DumpError;

    #[test]
    fn configuration_errors_exit_with_two() {
        assert_eq!(CliError::invalid("rows").exit_code(), 2);
        assert_eq!(CliError::from(DumpError::EmptyName).exit_code(), 2);
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = CliError::from(std::io::Error::other("boom"));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "I/O error: boom");
    }

    #[test]
    fn link_errors_wrap_the_core_message() {
        let error = CliError::from(DumpError::EmptyName);
        assert_eq!(error.to_string(), "invalid link: link name is empty");
    }
}
