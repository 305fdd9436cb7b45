//! Dispatch environment
//!
//! `Env` binds a runtime context to a configuration. Every `Class` and
//! `Object` borrows the `Env` it was created from, so no value can outlive
//! the runtime it refers to.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use jinvoke_sdk::JvmContext;
use tracing::debug;

use crate::class::Class;
use crate::config::BridgeConfig;
use crate::dispatch;
use crate::error::{BridgeError, BridgeResult};
use crate::object::{Object, Value};

/// A runtime context plus dispatch configuration.
pub struct Env {
    ctx: Arc<dyn JvmContext>,
    config: BridgeConfig,
}

impl Env {
    /// Environment with the default configuration
    pub fn new(ctx: Arc<dyn JvmContext>) -> Self {
        Self::with_config(ctx, BridgeConfig::default())
    }

    /// Environment with an explicit configuration
    pub fn with_config(ctx: Arc<dyn JvmContext>, config: BridgeConfig) -> Self {
        Self { ctx, config }
    }

    /// Environment configured from a TOML file
    pub fn from_config_file(ctx: Arc<dyn JvmContext>, path: impl AsRef<Path>) -> BridgeResult<Self> {
        let config = BridgeConfig::from_file(path.as_ref())?;
        debug!(target: "jinvoke::env", ?config, "configuration loaded");
        Ok(Self::with_config(ctx, config))
    }

    /// The runtime context
    pub fn context(&self) -> &dyn JvmContext {
        self.ctx.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Look up a class by slash-separated name
    pub fn find_class(&self, name: &str) -> BridgeResult<Class<'_>> {
        Class::for_name(self, name)
    }

    /// Resolve a constructor of `class_name` over the classes of `args`,
    /// invoke it, and return the new object.
    pub fn create<'e>(&'e self, class_name: &str, args: &[Object<'e>]) -> BridgeResult<Object<'e>> {
        let class = Class::for_name(self, class_name)?;
        let arg_classes = args
            .iter()
            .map(Object::get_class)
            .collect::<BridgeResult<Vec<_>>>()?;
        let constructor = class.lookup_constructor(&arg_classes)?;
        debug!(target: "jinvoke::env", class = class_name, arity = args.len(), "creating instance");

        let marshaled = dispatch::marshal(self, constructor.params(), args)?;
        let raw = self
            .context()
            .new_object(class.raw(), constructor.id(), marshaled.values())?;
        let mut object = Object::from_local_ref(self, raw);
        if self.config.global_results {
            object.make_global()?;
        }
        Ok(object)
    }

    /// New object array of `size` slots of class `class_name`, every slot
    /// set to `initial`
    pub fn create_array<'e>(
        &'e self,
        class_name: &str,
        size: usize,
        initial: &Object<'e>,
    ) -> BridgeResult<Object<'e>> {
        let element_class = Class::for_name(self, class_name)?;
        let Value::Reference(initial) = initial.value() else {
            return Err(BridgeError::type_mismatch(
                "reference initial value",
                initial.kind().to_string(),
            ));
        };
        let initial = initial.as_ref().map(|r| r.raw()).unwrap_or_default();
        let raw = self
            .context()
            .new_object_array(size, element_class.raw(), initial)?;
        Ok(Object::from_local_ref(self, raw))
    }

    /// Define a class from raw class-file bytes through the configured
    /// class loader
    pub fn load_class(&self, name: &str, bytes: &[u8]) -> BridgeResult<Class<'_>> {
        let loader_config = &self.config.loader;
        let loader = Class::for_name(self, &loader_config.class)?
            .call_static(&loader_config.factory, &[])?;
        let loader_ref = match loader.value() {
            Value::Reference(Some(r)) => r.raw(),
            _ => {
                return Err(BridgeError::type_mismatch(
                    "class loader",
                    format!("null from {}.{}", loader_config.class, loader_config.factory),
                ))
            }
        };
        debug!(target: "jinvoke::env", class = name, bytes = bytes.len(), "defining class");
        let raw = self.context().define_class(name, loader_ref, bytes)?;
        Ok(Class::from_local_ref(self, raw))
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").field("config", &self.config).finish()
    }
}
