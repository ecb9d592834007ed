//! Qualifiers narrow a lookup down to a subset of the beans registered for a type.

use crate::core::TypeKey;
use crate::definition::BeanDefinition;
use std::fmt;

/// Restricts which candidates of a type a lookup may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
  /// Only beans registered under exactly this name.
  ByName(String),
  /// Beans whose exposed type arguments match, preferring the closest match.
  ///
  /// A `None` entry matches any argument in that position.
  ByTypeArgumentsClosest(Vec<Option<TypeKey>>),
}

impl Qualifier {
  pub fn by_name(name: impl Into<String>) -> Self {
    Qualifier::ByName(name.into())
  }

  pub fn by_type_arguments_closest(arguments: impl IntoIterator<Item = Option<TypeKey>>) -> Self {
    Qualifier::ByTypeArgumentsClosest(arguments.into_iter().collect())
  }

  /// How far a definition is from satisfying this qualifier, or `None` when it
  /// does not qualify at all. Lower is closer.
  pub(crate) fn distance(&self, definition: &BeanDefinition) -> Option<usize> {
    match self {
      Qualifier::ByName(name) => (definition.name() == Some(name.as_str())).then_some(0),
      Qualifier::ByTypeArgumentsClosest(requested) => {
        let exposed = definition.exposed_type_arguments();
        if exposed.len() == requested.len()
          && requested
            .iter()
            .zip(exposed)
            .all(|(want, have)| want.map_or(true, |want| want == *have))
        {
          Some(0)
        } else if exposed.is_empty() {
          // A raw registration still satisfies the type, just less precisely.
          Some(1)
        } else {
          None
        }
      }
    }
  }
}

impl fmt::Display for Qualifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Qualifier::ByName(name) => write!(f, "name \"{}\"", name),
      Qualifier::ByTypeArgumentsClosest(arguments) => {
        f.write_str("type arguments <")?;
        for (i, argument) in arguments.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          match argument {
            Some(key) => f.write_str(key.name())?,
            None => f.write_str("?")?,
          }
        }
        f.write_str(">")
      }
    }
  }
}
