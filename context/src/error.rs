//! Errors raised by bean lookups.

use crate::core::TypeKey;
use crate::qualifier::Qualifier;
use thiserror::Error;

/// Errors raised while looking up or creating a bean.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("No bean of type [{key}] exists{}", for_qualifier(.qualifier))]
  NoSuchBean {
    key: TypeKey,
    qualifier: Option<Qualifier>,
  },

  #[error("Multiple possible bean candidates found for type [{key}]{}: {candidates} candidates", for_qualifier(.qualifier))]
  NonUnique {
    key: TypeKey,
    qualifier: Option<Qualifier>,
    candidates: usize,
  },

  #[error("Circular dependency detected while resolving bean: {key}")]
  Circular { key: TypeKey },

  #[error("Bean of type [{found}] cannot be used as {expected}")]
  TypeMismatch {
    expected: &'static str,
    found: TypeKey,
  },

  #[error("The application context is not running")]
  NotRunning,

  #[error("Error instantiating bean of type [{key}]: {source}")]
  Creation {
    key: TypeKey,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl LookupError {
  /// Wraps a failure raised by a bean factory for `T`.
  pub fn creation<T: ?Sized + 'static>(
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    LookupError::Creation {
      key: TypeKey::of::<T>(),
      source: source.into(),
    }
  }
}

fn for_qualifier(qualifier: &Option<Qualifier>) -> String {
  match qualifier {
    Some(q) => format!(" for qualifier {}", q),
    None => String::new(),
  }
}

/// A specialized `Result` type for bean lookups.
pub type Result<T, E = LookupError> = std::result::Result<T, E>;
