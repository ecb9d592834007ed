//! The container query interface the resolver depends on.

use stepwire_context::{ApplicationContext, Bean, LookupError, Qualifier, TypeKey};

/// A running container the resolver can query.
///
/// Every lookup returns exactly one bean or fails; a missing or ambiguous bean
/// is an error, never a default value.
pub trait BeanLocator {
  /// The unique bean of raw type `ty`.
  fn get_bean(&self, ty: &TypeKey) -> Result<Bean, LookupError>;

  /// The bean of raw type `ty` registered under `name`.
  fn get_bean_by_name(&self, ty: &TypeKey, name: &str) -> Result<Bean, LookupError>;

  /// The bean of raw type `ty` whose type arguments match `type_arguments`
  /// most closely. `None` entries match any argument.
  fn get_bean_by_type_arguments_closest(
    &self,
    ty: &TypeKey,
    type_arguments: &[Option<TypeKey>],
  ) -> Result<Bean, LookupError>;
}

impl BeanLocator for ApplicationContext {
  fn get_bean(&self, ty: &TypeKey) -> Result<Bean, LookupError> {
    ApplicationContext::get_bean(self, ty, None)
  }

  fn get_bean_by_name(&self, ty: &TypeKey, name: &str) -> Result<Bean, LookupError> {
    ApplicationContext::get_bean(self, ty, Some(&Qualifier::by_name(name)))
  }

  fn get_bean_by_type_arguments_closest(
    &self,
    ty: &TypeKey,
    type_arguments: &[Option<TypeKey>],
  ) -> Result<Bean, LookupError> {
    let qualifier = Qualifier::by_type_arguments_closest(type_arguments.iter().copied());
    ApplicationContext::get_bean(self, ty, Some(&qualifier))
  }
}
