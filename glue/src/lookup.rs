//! Classification of constructor parameters into container lookups.
//!
//! Classification is a pure function of the parameter descriptor, kept apart
//! from [`Lookup::execute`] so the chosen policy can be inspected without a
//! container.

use crate::descriptor::{Parameter, TypeArgument};
use crate::locator::BeanLocator;
use stepwire_context::{Bean, LookupError, TypeKey};

/// The container request issued for one constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
  /// Raw type filtered by an exact bean name.
  Named { ty: TypeKey, name: String },
  /// Raw type filtered by the closest match on type arguments.
  Generic {
    ty: TypeKey,
    type_arguments: Vec<Option<TypeKey>>,
  },
  /// Raw type, unqualified.
  Plain { ty: TypeKey },
}

impl Lookup {
  pub fn ty(&self) -> TypeKey {
    match self {
      Lookup::Named { ty, .. } | Lookup::Generic { ty, .. } | Lookup::Plain { ty } => *ty,
    }
  }

  pub fn execute(&self, locator: &dyn BeanLocator) -> Result<Bean, LookupError> {
    match self {
      Lookup::Named { ty, name } => locator.get_bean_by_name(ty, name),
      Lookup::Generic { ty, type_arguments } => {
        locator.get_bean_by_type_arguments_closest(ty, type_arguments)
      }
      Lookup::Plain { ty } => locator.get_bean(ty),
    }
  }
}

/// Picks the lookup for `parameter`. A name qualifier wins over type
/// arguments, which win over the plain lookup.
pub fn classify(parameter: &Parameter) -> Lookup {
  let ty = parameter.ty();

  if let [name, ignored @ ..] = parameter.names() {
    if !ignored.is_empty() {
      tracing::warn!(
        parameter = %ty,
        honored = %name,
        ignored = ?ignored,
        "parameter has several name qualifiers; only the first is used"
      );
    }
    return Lookup::Named {
      ty,
      name: name.clone(),
    };
  }

  match parameter.generic_arguments() {
    Some(arguments) => Lookup::Generic {
      ty,
      type_arguments: extract_type_arguments(arguments),
    },
    None => Lookup::Plain { ty },
  }
}

/// Raw classes of `arguments`, in order. Wildcards and unresolved variables
/// leave a `None` in their position.
pub fn extract_type_arguments(arguments: &[TypeArgument]) -> Vec<Option<TypeKey>> {
  arguments.iter().map(TypeArgument::raw_class).collect()
}
