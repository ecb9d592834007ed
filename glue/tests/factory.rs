use std::fs;
use std::sync::Arc;
use stepwire::{
  Cause, ConfigError, Constructor, ContextObjectFactory, FactoryConfig, FactoryError, Glue,
  LookupError, ObjectFactory, ENVIRONMENTS_VAR, Parameter, TypeArgument, TypeKey,
};
use stepwire_context::{BeanDefinition, BeanRegistry};

// --- Test Fixtures ---

trait Repository: Send + Sync {
  fn url(&self) -> String;
}

struct PostgresRepository {
  url: String,
}
impl Repository for PostgresRepository {
  fn url(&self) -> String {
    self.url.clone()
  }
}

trait Validator: Send + Sync {
  fn check(&self, input: &str) -> bool;
}

struct Order;
struct Invoice;

struct NonEmpty;
impl Validator for NonEmpty {
  fn check(&self, input: &str) -> bool {
    !input.is_empty()
  }
}

struct ShortText;
impl Validator for ShortText {
  fn check(&self, input: &str) -> bool {
    input.len() < 8
  }
}

struct Logger {
  prefix: &'static str,
}

struct CheckoutSteps {
  repo: Arc<dyn Repository>,
  order_validator: Arc<dyn Validator>,
  log: Arc<Logger>,
}

impl Glue for CheckoutSteps {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(
      [
        Parameter::of::<dyn Repository>().named("db"),
        Parameter::of::<dyn Validator>().type_arguments([TypeArgument::class::<Order>()]),
        Parameter::of::<Logger>(),
      ],
      |mut args| {
        Ok(CheckoutSteps {
          repo: args.next()?,
          order_validator: args.next()?,
          log: args.next()?,
        })
      },
    )]
  }
}

fn registry() -> BeanRegistry {
  let registry = BeanRegistry::new();
  registry.add_instance_with_name("url", String::from("postgres://acceptance"));
  registry.add_singleton_trait_with_name::<dyn Repository>("db", |cx| {
    Ok(Arc::new(PostgresRepository {
      url: (*cx.get_named::<String>("url")?).clone(),
    }))
  });
  registry.add_singleton_trait_with_name::<dyn Repository>("replica", |_| {
    Ok(Arc::new(PostgresRepository {
      url: "postgres://replica".to_string(),
    }))
  });
  registry.register(
    BeanDefinition::singleton::<dyn Validator>(|_| Ok(Arc::new(NonEmpty)))
      .type_arguments([TypeKey::of::<Order>()]),
  );
  registry.register(
    BeanDefinition::singleton::<dyn Validator>(|_| Ok(Arc::new(ShortText)))
      .type_arguments([TypeKey::of::<Invoice>()]),
  );
  registry.register(BeanDefinition::instance(Logger { prefix: "[acceptance]" }).requires_env("acceptance"));
  registry.register(BeanDefinition::instance(Logger { prefix: "[prod]" }).requires_env("prod"));
  registry
}

// --- Tests ---

#[test]
fn test_glue_is_built_from_the_running_context() {
  // Arrange
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());
  factory.start().unwrap();

  // Act
  let steps = factory.get_instance::<CheckoutSteps>().unwrap();

  // Assert
  assert_eq!(steps.repo.url(), "postgres://acceptance");
  assert!(steps.order_validator.check("a long order line"));
  assert!(!steps.order_validator.check(""));
  assert_eq!(steps.log.prefix, "[acceptance]");
  factory.stop();
}

#[test]
fn test_singleton_beans_are_shared_between_glue_instances() {
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());
  factory.start().unwrap();

  let first = factory.get_instance::<CheckoutSteps>().unwrap();
  let second = factory.get_instance::<CheckoutSteps>().unwrap();

  assert!(Arc::ptr_eq(&first.repo, &second.repo));
  assert!(Arc::ptr_eq(&first.log, &second.log));
}

#[test]
fn test_environments_come_from_the_config() {
  // Arrange
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::new(["prod"]));

  // Act
  factory.start().unwrap();
  let steps = factory.get_instance::<CheckoutSteps>().unwrap();

  // Assert
  assert_eq!(factory.context().unwrap().environments(), ["prod"]);
  assert_eq!(steps.log.prefix, "[prod]");
}

#[test]
fn test_missing_environment_bean_fails_with_the_glue_type() {
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::new(["local"]));
  factory.start().unwrap();

  let err = factory.get_instance::<CheckoutSteps>().err().unwrap();

  assert_eq!(err.glue(), TypeKey::of::<CheckoutSteps>());
  assert!(matches!(
    err.cause(),
    Cause::Lookup {
      index: 2,
      source: LookupError::NoSuchBean { .. }
    }
  ));
}

#[test]
fn test_instances_require_a_started_factory() {
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());

  let before_start = factory.get_instance::<CheckoutSteps>().err().unwrap();
  assert!(matches!(before_start.cause(), Cause::NotStarted));

  factory.start().unwrap();
  assert!(factory.is_started());
  factory.stop();
  assert!(!factory.is_started());

  let after_stop = factory.get_instance::<CheckoutSteps>().err().unwrap();
  assert!(matches!(after_stop.cause(), Cause::NotStarted));
}

#[test]
fn test_start_is_not_reentrant_and_stop_is_safe_without_start() {
  let registry = registry();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());

  // Stopping a factory that never started does nothing.
  factory.stop();

  factory.start().unwrap();
  assert!(matches!(factory.start(), Err(FactoryError::AlreadyStarted)));

  // A stopped factory can be started again for a new run.
  factory.stop();
  factory.start().unwrap();
  assert!(factory.get_instance::<CheckoutSteps>().is_ok());
}

#[test]
fn test_factory_from_dir_reads_the_config_file() {
  // Arrange
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("stepwire.yaml"), "environments: [prod]\n").unwrap();
  let registry = registry();

  // Act
  let mut factory = ContextObjectFactory::from_dir(&registry, dir.path()).unwrap();
  factory.start().unwrap();

  // Assert
  if std::env::var(ENVIRONMENTS_VAR).map_or(true, |v| v.trim().is_empty()) {
    assert_eq!(factory.config(), &FactoryConfig::new(["prod"]));
    assert_eq!(factory.get_instance::<CheckoutSteps>().unwrap().log.prefix, "[prod]");
  }
}

#[test]
fn test_factory_from_dir_surfaces_malformed_config() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("stepwire.yml"), "environments: [prod\n").unwrap();
  let registry = registry();

  let err = ContextObjectFactory::from_dir(&registry, dir.path()).err().unwrap();

  assert!(matches!(err, FactoryError::Config(ConfigError::Parse(_))));
  assert!(err.to_string().starts_with("Failed to parse configuration"));
}

#[test]
fn test_add_glue_always_accepts() {
  let registry = BeanRegistry::new();
  let mut factory = ContextObjectFactory::new(&registry, FactoryConfig::default());

  assert!(factory.add_glue(TypeKey::of::<CheckoutSteps>()));
  assert!(factory.add_glue(TypeKey::of::<CheckoutSteps>()));
  assert!(!factory.is_started());
}

#[test]
fn test_global_factory_uses_the_global_registry() {
  struct GlobalSteps(Arc<u128>);
  impl Glue for GlobalSteps {
    fn constructors() -> Vec<Constructor<Self>> {
      vec![Constructor::new([Parameter::of::<u128>().named("global_steps_seed")], |mut args| {
        Ok(GlobalSteps(args.next()?))
      })]
    }
  }
  stepwire_context::global().add_instance_with_name("global_steps_seed", 7u128);

  let mut factory = ContextObjectFactory::from_global(FactoryConfig::default());
  factory.start().unwrap();

  assert_eq!(*factory.get_instance::<GlobalSteps>().unwrap().0, 7);
  assert_eq!(factory.config(), &FactoryConfig::default());
}
