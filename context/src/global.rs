//! The global bean registry and its access function.

use crate::registry::BeanRegistry;
use once_cell::sync::Lazy;

// The one and only global registry.
// It will be created on its first access in a thread-safe manner.
static GLOBAL_REGISTRY: Lazy<BeanRegistry> = Lazy::new(BeanRegistry::default);

/// Provides a reference to the global registry.
///
/// Beans registered here are picked up by every context started from it,
/// which is how step-definition suites typically share their wiring.
///
/// # Examples
///
/// ```
/// use stepwire_context::global;
///
/// fn register_beans() {
///   global().add_instance_with_name("base_url", String::from("http://localhost:8080"));
/// }
/// # register_beans();
/// ```
pub fn global() -> &'static BeanRegistry {
  &GLOBAL_REGISTRY
}
