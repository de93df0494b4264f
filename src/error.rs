use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a project
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The template engine has no template with this name
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template exists but failed to render
    #[error("Failed to render template {name}: {message}")]
    Render { name: String, message: String },

    /// The build descriptor lacks the baseline shape an addon clones from
    #[error("Unexpected build descriptor structure: {0}")]
    DescriptorStructure(String),

    /// A baseline build descriptor could not be read
    #[error("Invalid build descriptor: {0}")]
    Descriptor(String),

    /// A filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// The feature model was built from malformed input
    #[error("Invalid feature model: {0}")]
    InvalidModel(String),

    /// No addon is registered for the requested runtime
    #[error("No addon registered for server '{0}'")]
    UnsupportedServer(String),
}

impl GenerationError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerationError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns a user-facing message with a hint on how to proceed
    pub fn help_message(&self) -> String {
        match self {
            GenerationError::TemplateNotFound { name } => format!(
                "Error: template '{}' is missing\n\n\
                Help: check STARTERKIT_TEMPLATE_DIR; an override directory must \
                contain every template the selected server renders.",
                name
            ),
            GenerationError::DescriptorStructure(msg) => format!(
                "Error: the baseline pom.xml cannot be adapted ({})\n\n\
                Help: the baseline needs at least one profile holding a plugin \
                with one execution.",
                msg
            ),
            GenerationError::UnsupportedServer(server) => format!(
                "Error: no addon for '{}'\n\n\
                Help: run `starterkit list` to see the available servers.",
                server
            ),
            GenerationError::Io { path, source } => format!(
                "Error: cannot write {}\n\nDetails: {}\n\n\
                Help: discard the output directory and run the request again.",
                path.display(),
                source
            ),
            other => format!("Error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GenerationError::TemplateNotFound {
            name: "index.html".to_string(),
        };
        assert_eq!(err.to_string(), "Template not found: index.html");

        let err = GenerationError::DescriptorStructure("no profiles".to_string());
        assert_eq!(
            err.to_string(),
            "Unexpected build descriptor structure: no profiles"
        );
    }

    #[test]
    fn test_help_message_mentions_list_command() {
        let err = GenerationError::UnsupportedServer("wildfly".to_string());
        assert!(err.help_message().contains("starterkit list"));
    }

    #[test]
    fn test_io_constructor_keeps_path() {
        let err = GenerationError::io(
            "/tmp/out",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match err {
            GenerationError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/tmp/out"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Io error"),
        }
    }
}
