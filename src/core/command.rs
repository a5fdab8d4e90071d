use async_trait::async_trait;
use serde::Serialize;
use crate::core::library::LibraryError;

#[derive(Debug, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum CommandError {
    Unauthenticated {
        message: String,
        reason_code: Option<String>,
    },
    Forbidden {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Unauthenticated { message, reason_code }
            }
            LibraryError::NotGranted { message, reason_code } => {
                CommandError::Forbidden { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_access_errors() {
        assert!(matches!(CommandError::from(LibraryError::access_denied("login", None)), CommandError::Unauthenticated { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_granted("perm", None)), CommandError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_should_keep_validation_reason() {
        let err = CommandError::from(LibraryError::validation("too far", Some("TooFarAheadError".to_string())));
        match err {
            CommandError::Validation { reason_code, .. } => assert_eq!(Some("TooFarAheadError".to_string()), reason_code),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_map_unavailable_to_retryable_runtime() {
        let err = CommandError::from(LibraryError::unavailable("throttled", None, true));
        assert!(matches!(err, CommandError::Runtime { retryable: true, .. }));
    }

    #[tokio::test]
    async fn test_should_serialize_with_tag() {
        let json = serde_json::to_string(&CommandError::NotFound { message: "missing".to_string() }).unwrap();
        assert!(json.contains("\"error\":\"not_found\""));
    }
}
