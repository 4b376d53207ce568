//! Conversions from external infrastructure errors into domain errors.

use bizkit_domain::BizkitError;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BizkitError);

impl From<InfraError> for BizkitError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BizkitError> for InfraError {
    fn from(value: BizkitError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBizkitError {
    fn into_bizkit(self) -> BizkitError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl IntoBizkitError for SqlError {
    fn into_bizkit(self) -> BizkitError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => BizkitError::Storage("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        BizkitError::Storage("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        BizkitError::Storage("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        BizkitError::Storage("foreign key constraint violation".into())
                    }
                    (ErrorCode::CannotOpen, _) => {
                        BizkitError::Storage(format!("unable to open database file: {message}"))
                    }
                    _ => BizkitError::Storage(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => BizkitError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                BizkitError::Storage(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                BizkitError::Storage(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => BizkitError::Storage("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidPath(path) => BizkitError::Storage(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => BizkitError::Storage(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_bizkit())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(BizkitError::Storage(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl IntoBizkitError for std::io::Error {
    fn into_bizkit(self) -> BizkitError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => BizkitError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                BizkitError::Storage(format!("permission denied: {self}"))
            }
            _ => BizkitError::Storage(format!("I/O error: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_bizkit())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(BizkitError::Storage(format!("malformed stored document: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl IntoBizkitError for HttpError {
    fn into_bizkit(self) -> BizkitError {
        if self.is_timeout() {
            return BizkitError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return BizkitError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => BizkitError::Auth(message),
                404 => BizkitError::NotFound(message),
                400..=499 => BizkitError::Validation(message),
                _ => BizkitError::Network(message),
            };
        }

        BizkitError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_bizkit())
    }
}

/* -------------------------------------------------------------------------- */
/* jsonwebtoken::Error → BizkitError */
/* -------------------------------------------------------------------------- */

impl IntoBizkitError for JwtError {
    fn into_bizkit(self) -> BizkitError {
        let reason = match self.kind() {
            JwtErrorKind::ExpiredSignature => "token has expired",
            JwtErrorKind::ImmatureSignature => "token is not valid yet",
            JwtErrorKind::InvalidSignature => "token signature is invalid",
            JwtErrorKind::InvalidAlgorithm => "token algorithm is not accepted",
            JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                "token is malformed"
            }
            _ => "token is not valid",
        };
        BizkitError::Auth(reason.to_string())
    }
}

impl From<JwtError> for InfraError {
    fn from(value: JwtError) -> Self {
        InfraError(value.into_bizkit())
    }
}

/* -------------------------------------------------------------------------- */
/* mongodb::error::Error → BizkitError */
/* -------------------------------------------------------------------------- */

#[cfg(feature = "document-store")]
impl IntoBizkitError for mongodb::error::Error {
    fn into_bizkit(self) -> BizkitError {
        use mongodb::error::ErrorKind;

        match self.kind.as_ref() {
            ErrorKind::ServerSelection { .. } => {
                BizkitError::Storage(format!("document store unreachable: {self}"))
            }
            ErrorKind::Authentication { .. } => {
                BizkitError::Storage(format!("document store rejected credentials: {self}"))
            }
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                BizkitError::Storage(format!("malformed stored document: {self}"))
            }
            _ => BizkitError::Storage(self.to_string()),
        }
    }
}

#[cfg(feature = "document-store")]
impl From<mongodb::error::Error> for InfraError {
    fn from(value: mongodb::error::Error) -> Self {
        InfraError(value.into_bizkit())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
