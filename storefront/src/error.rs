//! Error types and result definitions for storefront simulations.
//!
//! [`StoreError`] carries a classification, a static description, optional dynamic detail and an
//! optional source, or aggregates several errors when more than one worker fails in the same run.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use config::shared::ValidationError;

/// Result type for storefront operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
struct ErrorPayload {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

/// Main error type of the simulation.
#[derive(Debug, Clone)]
pub struct StoreError {
    repr: ErrorRepr,
}

#[derive(Debug, Clone)]
enum ErrorRepr {
    Single(ErrorPayload),
    /// Failures of several workers joined in the same wait.
    Many {
        errors: Vec<StoreError>,
        location: &'static Location<'static>,
    },
}

/// Categories of failures a simulation can report.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Run inputs were rejected before any thread started.
    ConfigError,
    /// The slot buffer observed a put into a full shelf or a take from an empty one.
    ProtocolViolation,
    /// The operating system refused to spawn a worker thread.
    ThreadSpawnFailed,
    ProducerPanic,
    ConsumerPanic,
    Unknown,
}

impl StoreError {
    /// Returns the [`ErrorKind`] of this error, or of the first aggregated error.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::Single(ref payload) => payload.kind,
            ErrorRepr::Many { ref errors, .. } => errors
                .first()
                .map(|err| err.kind())
                .unwrap_or(ErrorKind::Unknown),
        }
    }

    /// Returns every [`ErrorKind`] contained in this error, flattened.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        match self.repr {
            ErrorRepr::Single(ref payload) => vec![payload.kind],
            ErrorRepr::Many { ref errors, .. } => {
                errors.iter().flat_map(|err| err.kinds()).collect()
            }
        }
    }

    /// Returns the dynamic detail, or the first one found among aggregated errors.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::Single(ref payload) => payload.detail.as_deref(),
            ErrorRepr::Many { ref errors, .. } => errors.iter().find_map(|e| e.detail()),
        }
    }

    /// Attaches an originating error. Ignored on aggregated errors.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        if let ErrorRepr::Single(ref mut payload) = self.repr {
            payload.source = Some(Arc::new(source));
        }
        self
    }

    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        StoreError {
            repr: ErrorRepr::Single(ErrorPayload {
                kind,
                description,
                detail,
                source,
                location: Location::caller(),
            }),
        }
    }
}

impl PartialEq for StoreError {
    fn eq(&self, other: &StoreError) -> bool {
        match (&self.repr, &other.repr) {
            (ErrorRepr::Single(a), ErrorRepr::Single(b)) => a.kind == b.kind,
            (ErrorRepr::Many { errors: a, .. }, ErrorRepr::Many { errors: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ErrorRepr::Single(payload) => {
                let location = payload.location;
                write!(
                    f,
                    "[{:?}] {} @ {}:{}:{}",
                    payload.kind,
                    payload.description,
                    location.file(),
                    location.line(),
                    location.column()
                )?;

                if let Some(detail) = payload.detail.as_deref() {
                    write!(f, "\n  Detail: {detail}")?;
                }

                Ok(())
            }
            ErrorRepr::Many { errors, location } => {
                write!(
                    f,
                    "[Many] {} errors aggregated @ {}:{}:{}",
                    errors.len(),
                    location.file(),
                    location.line(),
                    location.column()
                )?;

                for (index, error) in errors.iter().enumerate() {
                    for (line_index, line) in error.to_string().lines().enumerate() {
                        if line_index == 0 {
                            write!(f, "\n  {}. {line}", index + 1)?;
                        } else {
                            write!(f, "\n     {line}")?;
                        }
                    }
                }

                Ok(())
            }
        }
    }
}

impl error::Error for StoreError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.repr {
            ErrorRepr::Single(payload) => payload
                .source
                .as_ref()
                .map(|source| source.as_ref() as &(dyn error::Error + 'static)),
            ErrorRepr::Many { errors, .. } => errors
                .first()
                .map(|error| error as &(dyn error::Error + 'static)),
        }
    }
}

impl From<(ErrorKind, &'static str)> for StoreError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> StoreError {
        StoreError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

impl<D> From<(ErrorKind, &'static str, D)> for StoreError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> StoreError {
        StoreError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Aggregates worker failures. A single error is returned unwrapped.
impl<E> From<Vec<E>> for StoreError
where
    E: Into<StoreError>,
{
    #[track_caller]
    fn from(errors: Vec<E>) -> StoreError {
        let location = Location::caller();
        let mut errors: Vec<StoreError> = errors.into_iter().map(Into::into).collect();

        if errors.len() == 1 {
            return errors.remove(0);
        }

        StoreError {
            repr: ErrorRepr::Many { errors, location },
        }
    }
}

impl From<ValidationError> for StoreError {
    #[track_caller]
    fn from(err: ValidationError) -> StoreError {
        let detail = err.to_string();
        StoreError::from_components(
            ErrorKind::ConfigError,
            Cow::Borrowed("Simulation configuration is invalid"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_error;

    #[test]
    fn single_error_keeps_kind_and_detail() {
        let err = store_error!(
            ErrorKind::ProtocolViolation,
            "Slot buffer is full",
            "capacity 3"
        );

        assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
        assert_eq!(err.detail(), Some("capacity 3"));
        assert!(err.to_string().starts_with("[ProtocolViolation] Slot buffer is full"));
    }

    #[test]
    fn aggregation_flattens_kinds() {
        let err: StoreError = vec![
            store_error!(ErrorKind::ConsumerPanic, "Consumer panicked"),
            store_error!(ErrorKind::ProducerPanic, "Producer panicked"),
        ]
        .into();

        assert_eq!(err.kind(), ErrorKind::ConsumerPanic);
        assert_eq!(
            err.kinds(),
            vec![ErrorKind::ConsumerPanic, ErrorKind::ProducerPanic]
        );
        assert!(err.to_string().contains("[Many] 2 errors aggregated"));
    }

    #[test]
    fn single_element_vector_is_unwrapped() {
        let err: StoreError = vec![store_error!(ErrorKind::Unknown, "Oops")].into();
        assert_eq!(err.kinds(), vec![ErrorKind::Unknown]);
        assert!(!err.to_string().starts_with("[Many]"));
    }

    #[test]
    fn validation_error_maps_to_config_error() {
        let err = StoreError::from(ValidationError::BufferCapacityZero);
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(error::Error::source(&err).is_some());
    }
}
