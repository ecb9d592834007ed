//! Error types for glue resolution, configuration and the factory lifecycle.

use std::path::PathBuf;
use stepwire_context::{LookupError, TypeKey};
use thiserror::Error;

/// A failure raised while invoking a glue constructor.
#[derive(Debug, Error)]
pub enum InvocationError {
  #[error("Argument {index} was already taken or does not exist")]
  MissingArgument { index: usize },

  #[error("Argument {index} is a [{found}], not a {expected}")]
  ArgumentType {
    index: usize,
    expected: &'static str,
    found: TypeKey,
  },

  #[error("Constructor failed: {0}")]
  Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl InvocationError {
  /// Wraps an error raised by the constructor body itself.
  pub fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    InvocationError::Failed(source.into())
  }
}

/// Why a glue instance could not be produced.
#[derive(Debug, Error)]
pub enum Cause {
  #[error("Could not resolve constructor parameter {index}")]
  Lookup {
    index: usize,
    #[source]
    source: LookupError,
  },

  #[error("Constructor invocation failed")]
  Invocation(#[source] InvocationError),

  #[error("No constructor is declared")]
  NoConstructor,

  #[error("The object factory has not been started")]
  NotStarted,
}

/// The single failure reported to the host engine for a glue type.
///
/// It names the glue type that could not be built; the underlying reason is
/// available through [`cause`](Self::cause) and the `source` chain.
#[derive(Debug, Error)]
#[error("Failed to instantiate {glue}")]
pub struct ResolveError {
  glue: TypeKey,
  #[source]
  cause: Cause,
}

impl ResolveError {
  pub(crate) fn new(glue: TypeKey, cause: Cause) -> Self {
    Self { glue, cause }
  }

  pub fn glue(&self) -> TypeKey {
    self.glue
  }

  pub fn cause(&self) -> &Cause {
    &self.cause
  }
}

/// Errors raised while loading [`FactoryConfig`](crate::FactoryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("Failed to read configuration file: {0}")]
  Read(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  Parse(String),
}

/// Errors raised by the object factory lifecycle.
#[derive(Debug, Error)]
pub enum FactoryError {
  #[error("The object factory has already been started")]
  AlreadyStarted,

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// A specialized `Result` type for glue resolution.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
