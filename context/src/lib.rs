//! # Stepwire Context
//!
//! A small, thread-safe bean context for wiring step-definition glue.
//!
//! Beans are registered explicitly in a [`BeanRegistry`], then an
//! [`ApplicationContext`] is run for a set of environment labels. Only the
//! definitions active for those environments take part in lookups.
//!
//! ## Core Concepts
//!
//! - **Registry**: the thread-safe set of bean definitions. A process-wide one
//!   is available through `global()`.
//! - **Context**: a started snapshot of the registry with its own singletons.
//! - **Qualifiers**: lookups may be narrowed by bean name, or by the type
//!   arguments a bean exposes, in which case the closest match wins.
//! - **Traits**: beans can be registered against a trait and resolved as a trait object.
//!
//! ## Quick Start
//!
//! ```
//! use stepwire_context::{ApplicationContext, BeanDefinition, BeanRegistry};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         self.message.clone()
//!     }
//! }
//!
//! let registry = BeanRegistry::new();
//! registry.add_instance_with_name("greeting_message", String::from("Hello, World!"));
//!
//! // The factory can itself resolve other beans from the running context.
//! registry.add_singleton_trait::<dyn Greeter>(|cx| {
//!     let message = cx.get_named::<String>("greeting_message")?;
//!     Ok(Arc::new(EnglishGreeter { message: (*message).clone() }))
//! });
//!
//! // Only active in the "test" environment.
//! registry.register(BeanDefinition::instance(42u32).requires_env("test"));
//!
//! let context = ApplicationContext::run(&registry, ["acceptance", "test"]);
//! assert_eq!(context.get::<dyn Greeter>().unwrap().greet(), "Hello, World!");
//! assert_eq!(*context.get::<u32>().unwrap(), 42);
//! context.stop();
//! ```

mod context;
mod core;
mod definition;
mod error;
mod global;
mod qualifier;
mod registry;

pub use crate::core::{Bean, Scope, TypeKey};
pub use context::ApplicationContext;
pub use definition::BeanDefinition;
pub use error::{LookupError, Result};
pub use global::global;
pub use qualifier::Qualifier;
pub use registry::BeanRegistry;
