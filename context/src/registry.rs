//! The `BeanRegistry` struct and its registration methods.

use crate::context::ApplicationContext;
use crate::core::TypeKey;
use crate::definition::BeanDefinition;
use crate::error::LookupError;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// The set of bean definitions a context can be started from.
///
/// Registration is thread-safe and works through a shared reference, so
/// definitions may be added from anywhere before a context is run. Several
/// definitions can share a type; lookups tell them apart by name, type
/// arguments or the primary flag.
#[derive(Default)]
pub struct BeanRegistry {
  definitions: DashMap<TypeKey, Vec<BeanDefinition>>,
}

impl BeanRegistry {
  /// Creates a new, empty `BeanRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&self, definition: BeanDefinition) {
    self
      .definitions
      .entry(definition.key())
      .or_default()
      .push(definition);
  }

  // --- Instance Registration ---
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.register(BeanDefinition::instance(instance));
  }
  pub fn add_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.register(BeanDefinition::instance(instance).named(name));
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&ApplicationContext) -> Result<T, LookupError> + Send + Sync + 'static,
  ) {
    self.register(BeanDefinition::singleton(move |cx| factory(cx).map(Arc::new)));
  }
  pub fn add_singleton_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&ApplicationContext) -> Result<T, LookupError> + Send + Sync + 'static,
  ) {
    self.register(BeanDefinition::singleton(move |cx| factory(cx).map(Arc::new)).named(name));
  }

  // --- Prototype Registration ---
  pub fn add_prototype<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&ApplicationContext) -> Result<T, LookupError> + Send + Sync + 'static,
  ) {
    self.register(BeanDefinition::prototype(move |cx| factory(cx).map(Arc::new)));
  }

  // --- Trait Registration ---
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn(&ApplicationContext) -> Result<Arc<I>, LookupError> + Send + Sync + 'static,
  ) {
    self.register(BeanDefinition::singleton(factory));
  }
  pub fn add_singleton_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&ApplicationContext) -> Result<Arc<I>, LookupError> + Send + Sync + 'static,
  ) {
    self.register(BeanDefinition::singleton(factory).named(name));
  }

  /// Total number of registered definitions, across all types.
  pub fn len(&self) -> usize {
    self.definitions.iter().map(|entry| entry.value().len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Snapshot of the definitions active for `environments`, grouped by type.
  pub(crate) fn active_definitions(
    &self,
    environments: &[String],
  ) -> Vec<(TypeKey, Vec<BeanDefinition>)> {
    self
      .definitions
      .iter()
      .map(|entry| {
        let active = entry
          .value()
          .iter()
          .filter(|definition| definition.is_active(environments))
          .cloned()
          .collect::<Vec<_>>();
        (*entry.key(), active)
      })
      .filter(|(_, active)| !active.is_empty())
      .collect()
  }
}
