//! The host engine contract and its bean-context implementation.

use crate::config::FactoryConfig;
use crate::descriptor::Glue;
use crate::error::{Cause, FactoryError, ResolveError};
use crate::resolver;
use std::path::Path;
use stepwire_context::{global, ApplicationContext, BeanRegistry, TypeKey};

/// Lifecycle and instantiation hooks a step-definition engine drives.
///
/// The engine calls `start` once before a run, `add_glue` for every glue type
/// it discovers, `get_instance` whenever it needs a glue object, and `stop`
/// once the run is over.
pub trait ObjectFactory {
  fn start(&mut self) -> Result<(), FactoryError>;

  fn stop(&mut self);

  /// Accepts a glue type. Always returns `true`.
  fn add_glue(&mut self, glue: TypeKey) -> bool;

  fn get_instance<T: Glue>(&self) -> Result<T, ResolveError>;
}

/// An [`ObjectFactory`] backed by an [`ApplicationContext`] started from a
/// [`BeanRegistry`].
pub struct ContextObjectFactory<'r> {
  registry: &'r BeanRegistry,
  config: FactoryConfig,
  context: Option<ApplicationContext>,
}

impl ContextObjectFactory<'static> {
  /// A factory over the [`global`] registry.
  pub fn from_global(config: FactoryConfig) -> Self {
    Self::new(global(), config)
  }
}

impl<'r> ContextObjectFactory<'r> {
  pub fn new(registry: &'r BeanRegistry, config: FactoryConfig) -> Self {
    Self {
      registry,
      config,
      context: None,
    }
  }

  /// A factory configured from the `stepwire.yaml` (or `.yml`) in `dir`, with
  /// the environment variable override applied. Falls back to the defaults
  /// when `dir` holds no configuration file.
  pub fn from_dir(registry: &'r BeanRegistry, dir: &Path) -> Result<Self, FactoryError> {
    let config = FactoryConfig::load(dir)?;
    Ok(Self::new(registry, config))
  }

  pub fn config(&self) -> &FactoryConfig {
    &self.config
  }

  /// The running context, if the factory has been started.
  pub fn context(&self) -> Option<&ApplicationContext> {
    self.context.as_ref()
  }

  pub fn is_started(&self) -> bool {
    self.context.is_some()
  }
}

impl ObjectFactory for ContextObjectFactory<'_> {
  fn start(&mut self) -> Result<(), FactoryError> {
    if self.context.is_some() {
      return Err(FactoryError::AlreadyStarted);
    }
    self.context = Some(ApplicationContext::run(
      self.registry,
      self.config.environments.iter().cloned(),
    ));
    Ok(())
  }

  fn stop(&mut self) {
    if let Some(context) = self.context.take() {
      context.stop();
    }
  }

  fn add_glue(&mut self, _glue: TypeKey) -> bool {
    true
  }

  fn get_instance<T: Glue>(&self) -> Result<T, ResolveError> {
    match &self.context {
      Some(context) => resolver::resolve::<T>(context),
      None => Err(ResolveError::new(TypeKey::of::<T>(), Cause::NotStarted)),
    }
  }
}
