use stepwire_context::{ApplicationContext, BeanDefinition, BeanRegistry, LookupError, Qualifier, TypeKey};
use std::sync::Arc;

// --- Fixtures ---

trait Repository: Send + Sync {
  fn entity(&self) -> &'static str;
}

struct Order;
struct Invoice;

struct OrderRepository;
impl Repository for OrderRepository {
  fn entity(&self) -> &'static str {
    "order"
  }
}

struct InvoiceRepository;
impl Repository for InvoiceRepository {
  fn entity(&self) -> &'static str {
    "invoice"
  }
}

struct AnyRepository;
impl Repository for AnyRepository {
  fn entity(&self) -> &'static str {
    "any"
  }
}

fn repositories() -> BeanRegistry {
  let registry = BeanRegistry::new();
  registry.register(
    BeanDefinition::singleton::<dyn Repository>(|_| Ok(Arc::new(OrderRepository)))
      .type_arguments([TypeKey::of::<Order>()]),
  );
  registry.register(
    BeanDefinition::singleton::<dyn Repository>(|_| Ok(Arc::new(InvoiceRepository)))
      .type_arguments([TypeKey::of::<Invoice>()]),
  );
  registry
}

fn entity_for(context: &ApplicationContext, qualifier: &Qualifier) -> Result<&'static str, LookupError> {
  let bean = context.get_bean(&TypeKey::of::<dyn Repository>(), Some(qualifier))?;
  Ok(bean.downcast::<dyn Repository>().unwrap().entity())
}

// --- Tests ---

#[test]
fn test_type_arguments_select_the_matching_bean() {
  // Arrange
  let context = ApplicationContext::run(&repositories(), ["test"]);

  // Act & Assert
  let orders = Qualifier::by_type_arguments_closest([Some(TypeKey::of::<Order>())]);
  let invoices = Qualifier::by_type_arguments_closest([Some(TypeKey::of::<Invoice>())]);
  assert_eq!(entity_for(&context, &orders).unwrap(), "order");
  assert_eq!(entity_for(&context, &invoices).unwrap(), "invoice");
}

#[test]
fn test_raw_registration_is_the_fallback_match() {
  // Arrange
  struct Customer;
  let registry = repositories();
  registry.add_singleton_trait::<dyn Repository>(|_| Ok(Arc::new(AnyRepository)));
  let context = ApplicationContext::run(&registry, ["test"]);

  // Act & Assert
  // An exact match still beats the raw registration.
  let orders = Qualifier::by_type_arguments_closest([Some(TypeKey::of::<Order>())]);
  assert_eq!(entity_for(&context, &orders).unwrap(), "order");
  // Nothing exposes `Customer`, so the raw registration is the closest.
  let customers = Qualifier::by_type_arguments_closest([Some(TypeKey::of::<Customer>())]);
  assert_eq!(entity_for(&context, &customers).unwrap(), "any");
}

#[test]
fn test_unknown_type_argument_matches_every_candidate() {
  // Arrange
  let context = ApplicationContext::run(&repositories(), ["test"]);

  // Act
  let err = entity_for(&context, &Qualifier::by_type_arguments_closest([None])).unwrap_err();

  // Assert
  assert!(matches!(err, LookupError::NonUnique { candidates: 2, .. }));
}

#[test]
fn test_unmatched_type_arguments_are_not_found() {
  struct Customer;
  let context = ApplicationContext::run(&repositories(), ["test"]);

  let qualifier = Qualifier::by_type_arguments_closest([Some(TypeKey::of::<Customer>())]);
  let err = entity_for(&context, &qualifier).unwrap_err();

  assert!(matches!(err, LookupError::NoSuchBean { qualifier: Some(_), .. }));
}

#[test]
fn test_unqualified_lookup_with_two_candidates_is_ambiguous() {
  let context = ApplicationContext::run(&repositories(), ["test"]);

  let err = context.get::<dyn Repository>().err().unwrap();

  assert!(matches!(err, LookupError::NonUnique { candidates: 2, qualifier: None, .. }));
}

#[test]
fn test_primary_breaks_ties() {
  // Arrange
  let registry = repositories();
  registry.register(
    BeanDefinition::singleton::<dyn Repository>(|_| Ok(Arc::new(AnyRepository))).primary(),
  );
  let context = ApplicationContext::run(&registry, ["test"]);

  // Act & Assert
  assert_eq!(context.get::<dyn Repository>().unwrap().entity(), "any");
}

#[test]
fn test_name_qualifier_is_exact() {
  // Arrange
  let registry = BeanRegistry::new();
  registry.add_instance_with_name("db", String::from("postgres://db"));
  registry.add_instance_with_name("cache", String::from("redis://cache"));
  let context = ApplicationContext::run(&registry, ["test"]);

  // Act & Assert
  assert_eq!(*context.get_named::<String>("db").unwrap(), "postgres://db");
  assert_eq!(*context.get_named::<String>("cache").unwrap(), "redis://cache");
  let err = context.get_named::<String>("DB").err().unwrap();
  assert_eq!(
    err.to_string(),
    "No bean of type [alloc::string::String] exists for qualifier name \"DB\""
  );
}

#[test]
fn test_single_named_bean_satisfies_unqualified_lookup() {
  let registry = BeanRegistry::new();
  registry.add_instance_with_name("only", 5u64);
  let context = ApplicationContext::run(&registry, ["test"]);

  assert_eq!(*context.get::<u64>().unwrap(), 5);
}
