//! Constructor dependency resolution.

use crate::descriptor::{Arguments, Constructor, Glue};
use crate::error::{Cause, ResolveError};
use crate::locator::BeanLocator;
use crate::lookup::{classify, Lookup};
use stepwire_context::TypeKey;

/// Picks the constructor used to build `T`: the first one declared.
///
/// Glue types are expected to declare a single constructor. When there are
/// more, the rest are never considered.
fn select_constructor<T: Glue>() -> Result<Constructor<T>, ResolveError> {
  let glue = TypeKey::of::<T>();
  let mut constructors = T::constructors();
  if constructors.len() > 1 {
    tracing::debug!(
      glue = %glue,
      declared = constructors.len(),
      "several constructors declared; using the first"
    );
  }
  if constructors.is_empty() {
    return Err(ResolveError::new(glue, Cause::NoConstructor));
  }
  Ok(constructors.swap_remove(0))
}

/// The lookups `resolve` would issue for `T`, one per constructor parameter.
pub fn plan<T: Glue>() -> Result<Vec<Lookup>, ResolveError> {
  let constructor = select_constructor::<T>()?;
  Ok(constructor.parameters().iter().map(classify).collect())
}

/// Builds a `T` by resolving every constructor parameter against `locator`.
///
/// All lookups happen before the constructor runs. The first failing lookup
/// aborts the call, so the constructor runs at most once and only with a
/// complete set of arguments.
pub fn resolve<T: Glue>(locator: &dyn BeanLocator) -> Result<T, ResolveError> {
  let glue = TypeKey::of::<T>();
  let constructor = select_constructor::<T>()?;

  let mut values = Vec::with_capacity(constructor.parameter_count());
  for (index, parameter) in constructor.parameters().iter().enumerate() {
    let lookup = classify(parameter);
    tracing::debug!(glue = %glue, index, lookup = ?lookup, "resolving constructor parameter");
    let bean = lookup
      .execute(locator)
      .map_err(|source| ResolveError::new(glue, Cause::Lookup { index, source }))?;
    values.push(bean);
  }

  constructor
    .invoke(Arguments::new(values))
    .map_err(|e| ResolveError::new(glue, Cause::Invocation(e)))
}
