//! # Stepwire
//!
//! Builds step-definition glue objects by resolving their constructor
//! dependencies from a running [`ApplicationContext`](stepwire_context::ApplicationContext).
//!
//! A glue type describes its constructors through the [`Glue`] trait. For each
//! parameter of the first constructor the resolver picks one lookup:
//!
//! - a **name qualifier** requests the bean registered under that name,
//! - otherwise **type arguments** request the bean whose exposed type
//!   arguments match most closely,
//! - otherwise the bean is requested by its type alone.
//!
//! All lookups must succeed before the constructor runs.
//!
//! ## Quick Start
//!
//! ```
//! use stepwire::{
//!   Constructor, ContextObjectFactory, FactoryConfig, Glue, ObjectFactory, Parameter, TypeArgument,
//! };
//! use stepwire_context::{BeanDefinition, BeanRegistry, TypeKey};
//! use std::sync::Arc;
//!
//! struct Repo(&'static str);
//! struct Validator;
//! struct Logger;
//!
//! struct Steps {
//!   repo: Arc<Repo>,
//!   validators: Arc<Vec<Validator>>,
//!   _log: Arc<Logger>,
//! }
//!
//! impl Glue for Steps {
//!   fn constructors() -> Vec<Constructor<Self>> {
//!     vec![Constructor::new(
//!       [
//!         Parameter::of::<Repo>().named("db"),
//!         Parameter::of::<Vec<Validator>>().type_arguments([TypeArgument::class::<Validator>()]),
//!         Parameter::of::<Logger>(),
//!       ],
//!       |mut args| {
//!         Ok(Steps {
//!           repo: args.next()?,
//!           validators: args.next()?,
//!           _log: args.next()?,
//!         })
//!       },
//!     )]
//!   }
//! }
//!
//! let registry = BeanRegistry::new();
//! registry.add_instance_with_name("db", Repo("postgres"));
//! registry.register(
//!   BeanDefinition::instance(vec![Validator, Validator]).type_arguments([TypeKey::of::<Validator>()]),
//! );
//! registry.add_instance(Logger);
//!
//! let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());
//! factory.start().unwrap();
//! let steps = factory.get_instance::<Steps>().unwrap();
//! assert_eq!(steps.repo.0, "postgres");
//! assert_eq!(steps.validators.len(), 2);
//! factory.stop();
//! ```

mod config;
mod descriptor;
mod error;
mod factory;
mod locator;
pub mod lookup;
pub mod resolver;

pub use config::{FactoryConfig, CONFIG_FILE_NAMES, ENVIRONMENTS_VAR};
pub use descriptor::{Arguments, Constructor, Glue, Parameter, TypeArgument};
pub use error::{Cause, ConfigError, FactoryError, InvocationError, ResolveError, Result};
pub use factory::{ContextObjectFactory, ObjectFactory};
pub use locator::BeanLocator;
pub use lookup::{classify, Lookup};
pub use resolver::{plan, resolve};

pub use stepwire_context::{Bean, LookupError, TypeKey};
