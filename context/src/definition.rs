//! Bean definitions: what to build, under which key, and when it is active.

use crate::context::ApplicationContext;
use crate::core::{Bean, Scope, TypeKey};
use crate::error::LookupError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub(crate) type Factory = dyn Fn(&ApplicationContext) -> Result<Bean, LookupError> + Send + Sync;

/// A recipe for a bean, registered in a [`BeanRegistry`](crate::BeanRegistry).
///
/// Definitions are cheap to clone; the factory is shared. Each running
/// [`ApplicationContext`] keeps its own singleton instances, so the same
/// definition can back any number of contexts.
#[derive(Clone)]
pub struct BeanDefinition {
  key: TypeKey,
  name: Option<String>,
  type_arguments: Vec<TypeKey>,
  environments: Vec<String>,
  primary: bool,
  scope: Scope,
  factory: Arc<Factory>,
}

impl BeanDefinition {
  fn with_scope<T: ?Sized + Any + Send + Sync>(
    scope: Scope,
    factory: impl Fn(&ApplicationContext) -> Result<Arc<T>, LookupError> + Send + Sync + 'static,
  ) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      name: None,
      type_arguments: Vec::new(),
      environments: Vec::new(),
      primary: false,
      scope,
      factory: Arc::new(move |context: &ApplicationContext| factory(context).map(Bean::new)),
    }
  }

  /// A bean created lazily on first lookup and shared afterwards.
  pub fn singleton<T: ?Sized + Any + Send + Sync>(
    factory: impl Fn(&ApplicationContext) -> Result<Arc<T>, LookupError> + Send + Sync + 'static,
  ) -> Self {
    Self::with_scope(Scope::Singleton, factory)
  }

  /// A bean created anew on every lookup.
  pub fn prototype<T: ?Sized + Any + Send + Sync>(
    factory: impl Fn(&ApplicationContext) -> Result<Arc<T>, LookupError> + Send + Sync + 'static,
  ) -> Self {
    Self::with_scope(Scope::Prototype, factory)
  }

  /// A pre-built value. Every context started from it shares the same instance.
  pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
    let shared = Arc::new(value);
    Self::singleton(move |_| Ok(Arc::clone(&shared)))
  }

  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Declares the type arguments this bean exposes, e.g. `Order` for a
  /// repository of orders registered as `dyn Repository`.
  pub fn type_arguments(mut self, arguments: impl IntoIterator<Item = TypeKey>) -> Self {
    self.type_arguments = arguments.into_iter().collect();
    self
  }

  /// Only activate this bean when the context runs with `environment`.
  /// Calling it more than once requires all of the given environments.
  pub fn requires_env(mut self, environment: impl Into<String>) -> Self {
    self.environments.push(environment.into());
    self
  }

  /// Prefer this bean when a lookup would otherwise be ambiguous.
  pub fn primary(mut self) -> Self {
    self.primary = true;
    self
  }

  pub fn key(&self) -> TypeKey {
    self.key
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn exposed_type_arguments(&self) -> &[TypeKey] {
    &self.type_arguments
  }

  pub fn required_environments(&self) -> &[String] {
    &self.environments
  }

  pub fn is_primary(&self) -> bool {
    self.primary
  }

  pub fn scope(&self) -> Scope {
    self.scope
  }

  pub(crate) fn is_active(&self, environments: &[String]) -> bool {
    self
      .environments
      .iter()
      .all(|required| environments.iter().any(|active| active == required))
  }

  pub(crate) fn create(&self, context: &ApplicationContext) -> Result<Bean, LookupError> {
    (self.factory)(context)
  }
}

impl fmt::Debug for BeanDefinition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BeanDefinition")
      .field("key", &self.key)
      .field("name", &self.name)
      .field("type_arguments", &self.type_arguments)
      .field("environments", &self.environments)
      .field("primary", &self.primary)
      .field("scope", &self.scope)
      .finish_non_exhaustive()
  }
}
