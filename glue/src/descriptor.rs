//! Descriptors a glue type publishes about its constructors.
//!
//! Rust has no runtime reflection, so a glue type describes its own
//! constructors: the parameters each one takes and a closure that builds the
//! value from resolved arguments.

use crate::error::InvocationError;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use stepwire_context::{Bean, TypeKey};

/// One actual type argument of a parameterized parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
  /// A plain type, e.g. `Validator` in `List<Validator>`.
  Class(TypeKey),
  /// A nested parameterized type, e.g. `Map<K, V>` in `List<Map<K, V>>`.
  Parameterized {
    raw: TypeKey,
    arguments: Vec<TypeArgument>,
  },
  /// An unbounded or bounded wildcard.
  Wildcard,
  /// An unresolved generic variable, by name.
  Variable(&'static str),
}

impl TypeArgument {
  pub fn class<T: ?Sized + Any>() -> Self {
    TypeArgument::Class(TypeKey::of::<T>())
  }

  pub fn parameterized<T: ?Sized + Any>(arguments: impl IntoIterator<Item = TypeArgument>) -> Self {
    TypeArgument::Parameterized {
      raw: TypeKey::of::<T>(),
      arguments: arguments.into_iter().collect(),
    }
  }

  /// The class a lookup can filter on: the type itself for plain types, the
  /// raw type for nested parameterized types, nothing otherwise.
  pub fn raw_class(&self) -> Option<TypeKey> {
    match self {
      TypeArgument::Class(key) => Some(*key),
      TypeArgument::Parameterized { raw, .. } => Some(*raw),
      TypeArgument::Wildcard | TypeArgument::Variable(_) => None,
    }
  }
}

/// A constructor parameter: its raw type, its type arguments when the declared
/// type is parameterized, and the name qualifiers attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
  ty: TypeKey,
  type_arguments: Option<Vec<TypeArgument>>,
  names: Vec<String>,
}

impl Parameter {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      ty: TypeKey::of::<T>(),
      type_arguments: None,
      names: Vec::new(),
    }
  }

  /// Attaches a name qualifier. Only the first one takes part in resolution.
  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.names.push(name.into());
    self
  }

  /// Marks the declared type as parameterized over `arguments`.
  pub fn type_arguments(mut self, arguments: impl IntoIterator<Item = TypeArgument>) -> Self {
    self.type_arguments = Some(arguments.into_iter().collect());
    self
  }

  pub fn ty(&self) -> TypeKey {
    self.ty
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn generic_arguments(&self) -> Option<&[TypeArgument]> {
    self.type_arguments.as_deref()
  }
}

type Invoker<T> = dyn Fn(Arguments) -> Result<T, InvocationError>;

/// A constructor of `T`: its parameters in declaration order and the code
/// that builds a `T` from the matching arguments.
pub struct Constructor<T> {
  parameters: Vec<Parameter>,
  invoker: Box<Invoker<T>>,
}

impl<T> Constructor<T> {
  pub fn new(
    parameters: impl IntoIterator<Item = Parameter>,
    invoker: impl Fn(Arguments) -> Result<T, InvocationError> + 'static,
  ) -> Self {
    Self {
      parameters: parameters.into_iter().collect(),
      invoker: Box::new(invoker),
    }
  }

  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }

  pub fn parameter_count(&self) -> usize {
    self.parameters.len()
  }

  pub(crate) fn invoke(&self, arguments: Arguments) -> Result<T, InvocationError> {
    (self.invoker)(arguments)
  }
}

impl<T> fmt::Debug for Constructor<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Constructor")
      .field("type", &type_name::<T>())
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

/// A type whose instances are built by resolving constructor dependencies.
///
/// # Examples
///
/// ```
/// use stepwire::{Constructor, Glue, Parameter};
/// use std::sync::Arc;
///
/// struct Repo;
///
/// struct Steps {
///   repo: Arc<Repo>,
/// }
///
/// impl Glue for Steps {
///   fn constructors() -> Vec<Constructor<Self>> {
///     vec![Constructor::new([Parameter::of::<Repo>().named("db")], |mut args| {
///       Ok(Steps { repo: args.next()? })
///     })]
///   }
/// }
/// ```
pub trait Glue: Sized + 'static {
  /// The constructors of `Self`, in declaration order.
  fn constructors() -> Vec<Constructor<Self>>;
}

/// The resolved values for one constructor call, positionally aligned with
/// its parameters. Each value can be taken once.
#[derive(Debug)]
pub struct Arguments {
  values: Vec<Option<Bean>>,
  cursor: usize,
}

impl Arguments {
  pub(crate) fn new(values: Vec<Bean>) -> Self {
    Self {
      values: values.into_iter().map(Some).collect(),
      cursor: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Takes the argument after the one most recently taken through `next`.
  pub fn next<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>, InvocationError> {
    let index = self.cursor;
    self.cursor += 1;
    self.take(index)
  }

  /// Takes the argument at `index`.
  pub fn take<T: ?Sized + Any + Send + Sync>(&mut self, index: usize) -> Result<Arc<T>, InvocationError> {
    let bean = self
      .values
      .get_mut(index)
      .and_then(Option::take)
      .ok_or(InvocationError::MissingArgument { index })?;
    bean.downcast::<T>().ok_or(InvocationError::ArgumentType {
      index,
      expected: type_name::<T>(),
      found: bean.type_key(),
    })
  }
}
