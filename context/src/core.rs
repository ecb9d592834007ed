//! Core data structures shared by the registry and the running context.

use crate::error::LookupError;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

thread_local! {
  // The ids of the beans currently being constructed on this specific thread.
  // Re-entering one of them means a factory depends on itself.
  static RESOLVING_STACK: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// An RAII guard to detect circular dependencies.
///
/// When created, it adds a bean id to the thread-local resolution stack.
/// If the id is already present, creation fails with [`LookupError::Circular`].
/// When the guard is dropped, it removes the id from the stack.
pub(crate) struct ResolutionGuard {
  id: usize,
}

impl ResolutionGuard {
  pub(crate) fn enter(id: usize, key: TypeKey) -> Result<Self, LookupError> {
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(id));
    if !inserted {
      return Err(LookupError::Circular { key });
    }
    Ok(Self { id })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.id);
    });
  }
}

/// The identity of a type, usable for both concrete types and `dyn Trait` objects.
///
/// Two keys are equal when their `TypeId`s are equal; the name is carried only
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.id
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// A type-erased, shared bean value.
///
/// Internally this is an `Arc<T>` boxed behind `dyn Any`, which is what lets
/// unsized trait objects (`Arc<dyn Trait>`) travel through the same channel as
/// concrete types. Cloning a `Bean` never clones the underlying value.
#[derive(Clone)]
pub struct Bean {
  key: TypeKey,
  value: Arc<dyn Any + Send + Sync>,
}

impl Bean {
  pub fn new<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      value: Arc::new(value),
    }
  }

  /// The type the bean was created as.
  pub fn type_key(&self) -> TypeKey {
    self.key
  }

  /// Returns the shared value if the bean holds a `T`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.downcast_ref::<Arc<T>>().cloned()
  }

  /// Whether both handles refer to the same bean instance.
  pub fn ptr_eq(&self, other: &Bean) -> bool {
    Arc::ptr_eq(&self.value, &other.value)
  }
}

impl fmt::Debug for Bean {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Bean").field("type", &self.key.name).finish()
  }
}

/// How often a bean definition's factory runs within one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
  /// Created on first lookup, then shared for the lifetime of the context.
  Singleton,
  /// Created anew on every lookup.
  Prototype,
}
