//! The running bean context and its lookup rules.

use crate::core::{Bean, ResolutionGuard, Scope, TypeKey};
use crate::definition::BeanDefinition;
use crate::error::LookupError;
use crate::qualifier::Qualifier;
use crate::registry::BeanRegistry;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// Ids are unique across contexts so the thread-local resolution stack never
// confuses two contexts resolving on the same thread.
static NEXT_BEAN_ID: AtomicUsize = AtomicUsize::new(0);

struct ActiveBean {
  id: usize,
  definition: BeanDefinition,
  cell: OnceCell<Bean>,
}

impl ActiveBean {
  fn new(definition: BeanDefinition) -> Self {
    Self {
      id: NEXT_BEAN_ID.fetch_add(1, Ordering::Relaxed),
      definition,
      cell: OnceCell::new(),
    }
  }
}

/// A started bean context.
///
/// A context is a snapshot of the registry's definitions that are active for
/// its environments, plus the singleton instances created from them. It is
/// only ever read after [`run`](Self::run); lookups may be issued from any
/// number of threads.
pub struct ApplicationContext {
  environments: Vec<String>,
  beans: HashMap<TypeKey, Vec<ActiveBean>>,
  running: AtomicBool,
}

impl ApplicationContext {
  /// Starts a context holding every definition of `registry` that is active
  /// for `environments`.
  pub fn run<I, S>(registry: &BeanRegistry, environments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let environments: Vec<String> = environments.into_iter().map(Into::into).collect();
    let beans: HashMap<TypeKey, Vec<ActiveBean>> = registry
      .active_definitions(&environments)
      .into_iter()
      .map(|(key, definitions)| (key, definitions.into_iter().map(ActiveBean::new).collect()))
      .collect();

    tracing::info!(
      environments = ?environments,
      types = beans.len(),
      "application context started"
    );

    Self {
      environments,
      beans,
      running: AtomicBool::new(true),
    }
  }

  pub fn environments(&self) -> &[String] {
    &self.environments
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::Acquire)
  }

  /// Stops the context. Every lookup made afterwards fails with
  /// [`LookupError::NotRunning`]; stopping twice is a no-op.
  pub fn stop(&self) {
    if self.running.swap(false, Ordering::AcqRel) {
      tracing::info!(environments = ?self.environments, "application context stopped");
    }
  }

  /// Looks up exactly one bean of type `key`, optionally narrowed by `qualifier`.
  pub fn get_bean(&self, key: &TypeKey, qualifier: Option<&Qualifier>) -> Result<Bean, LookupError> {
    let bean = self.select(key, qualifier)?;
    self.instantiate(bean)
  }

  /// Resolves the unique bean of type `T`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>, LookupError> {
    let bean = self.get_bean(&TypeKey::of::<T>(), None)?;
    downcast(&bean)
  }

  /// Resolves the bean of type `T` registered under `name`.
  pub fn get_named<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, LookupError> {
    let bean = self.get_bean(&TypeKey::of::<T>(), Some(&Qualifier::by_name(name)))?;
    downcast(&bean)
  }

  fn select(&self, key: &TypeKey, qualifier: Option<&Qualifier>) -> Result<&ActiveBean, LookupError> {
    if !self.is_running() {
      return Err(LookupError::NotRunning);
    }

    let candidates = self.beans.get(key).map(Vec::as_slice).unwrap_or_default();
    let scored: Vec<(&ActiveBean, usize)> = candidates
      .iter()
      .filter_map(|bean| match qualifier {
        Some(q) => q.distance(&bean.definition).map(|d| (bean, d)),
        None => Some((bean, 0)),
      })
      .collect();

    let Some(best) = scored.iter().map(|(_, d)| *d).min() else {
      return Err(LookupError::NoSuchBean {
        key: *key,
        qualifier: qualifier.cloned(),
      });
    };
    let closest: Vec<&ActiveBean> = scored
      .into_iter()
      .filter(|(_, d)| *d == best)
      .map(|(bean, _)| bean)
      .collect();

    tracing::trace!(
      key = %key,
      candidates = candidates.len(),
      closest = closest.len(),
      "selecting bean"
    );

    if let [only] = closest.as_slice() {
      return Ok(*only);
    }
    let primaries: Vec<&ActiveBean> = closest
      .iter()
      .copied()
      .filter(|bean| bean.definition.is_primary())
      .collect();
    match primaries.as_slice() {
      [primary] => Ok(*primary),
      _ => Err(LookupError::NonUnique {
        key: *key,
        qualifier: qualifier.cloned(),
        candidates: closest.len(),
      }),
    }
  }

  fn instantiate(&self, bean: &ActiveBean) -> Result<Bean, LookupError> {
    let _guard = ResolutionGuard::enter(bean.id, bean.definition.key())?;
    match bean.definition.scope() {
      Scope::Singleton => bean
        .cell
        .get_or_try_init(|| bean.definition.create(self))
        .cloned(),
      Scope::Prototype => bean.definition.create(self),
    }
  }
}

fn downcast<T: ?Sized + Any + Send + Sync>(bean: &Bean) -> Result<Arc<T>, LookupError> {
  bean.downcast::<T>().ok_or(LookupError::TypeMismatch {
    expected: std::any::type_name::<T>(),
    found: bean.type_key(),
  })
}
