//! The helper/block-helper/partial registry and the callback calling
//! convention shared by all of them.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::CompileError;
use crate::tag_model::TagModel;

/// Reserved helper name backing bare escaped interpolation (`{{name}}`).
pub const ESCAPED_FALLBACK: &str = "__escaped__";
/// Reserved helper name backing bare unescaped interpolation (`{{{name}}}`).
pub const UNESCAPED_FALLBACK: &str = "__unescaped__";

/// The typed coercion boundary for helper callbacks.
///
/// The source calling convention lets a callback return a plain string, an
/// `Ok`, or an `Err`; rather than threading that union through every call
/// site, every helper in this crate returns `HelperOutcome`, and `From`
/// impls let a helper body still just `return "literal".into()` or
/// `return Err(msg.to_string()).into()` when that is more natural to write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HelperOutcome {
    Value(String),
    Error(CompileError),
}

impl From<String> for HelperOutcome {
    fn from(value: String) -> Self {
        HelperOutcome::Value(value)
    }
}

impl From<&str> for HelperOutcome {
    fn from(value: &str) -> Self {
        HelperOutcome::Value(value.to_string())
    }
}

impl From<Result<String, String>> for HelperOutcome {
    fn from(value: Result<String, String>) -> Self {
        match value {
            Ok(value) => HelperOutcome::Value(value),
            Err(message) => HelperOutcome::Error(CompileError::DialectSpecific(message)),
        }
    }
}

impl From<Result<String, CompileError>> for HelperOutcome {
    fn from(value: Result<String, CompileError>) -> Self {
        match value {
            Ok(value) => HelperOutcome::Value(value),
            Err(err) => HelperOutcome::Error(err),
        }
    }
}

impl From<CompileError> for HelperOutcome {
    fn from(err: CompileError) -> Self {
        HelperOutcome::Error(err)
    }
}

impl HelperOutcome {
    pub(crate) fn into_result(self) -> Result<String, CompileError> {
        match self {
            HelperOutcome::Value(value) => Ok(value),
            HelperOutcome::Error(err) => Err(err),
        }
    }
}

/// A helper, block-helper, or partial callback.
pub type Callback = Rc<dyn Fn(&TagModel) -> HelperOutcome>;

/// Holds the three helper maps and resolves lookups, falling back to the
/// reserved `__escaped__`/`__unescaped__`/not-registered behavior described
/// in the spec when an exact name isn't found.
#[derive(Clone)]
pub struct HelperRegistry {
    helpers: FxHashMap<String, Callback>,
    blocks: FxHashMap<String, Callback>,
    partials: FxHashMap<String, Callback>,
}

/// The default registry is the base dialect, not an empty map: the base
/// dialect's `__escaped__`/`__unescaped__` fallbacks must always be present
/// for `HelperRegistry::new()` consumers that build on top of `default()`.
impl Default for HelperRegistry {
    fn default() -> Self {
        crate::dialects::base::registry()
    }
}

fn validate_name(name: &str) -> Result<(), CompileError> {
    if name.is_empty() || name.starts_with('.') {
        return Err(CompileError::DialectSpecific(format!(
            "Invalid helper name: {name:?}"
        )));
    }
    Ok(())
}

impl HelperRegistry {
    /// An empty registry with no helpers, block-helpers, or partials
    /// registered — not even the `__escaped__`/`__unescaped__` fallbacks.
    /// Dialect builders (see `crate::dialects`) start from this and add
    /// their own fallbacks; most callers want `HelperRegistry::default()`
    /// (the base dialect) instead.
    pub fn new() -> Self {
        Self {
            helpers: FxHashMap::default(),
            blocks: FxHashMap::default(),
            partials: FxHashMap::default(),
        }
    }

    pub fn register_helper(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&TagModel) -> HelperOutcome + 'static,
    ) -> Result<(), CompileError> {
        let name = name.into();
        validate_name(&name)?;
        self.helpers.insert(name, Rc::new(callback));
        Ok(())
    }

    pub fn register_block(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&TagModel) -> HelperOutcome + 'static,
    ) -> Result<(), CompileError> {
        let name = name.into();
        validate_name(&name)?;
        self.blocks.insert(name, Rc::new(callback));
        Ok(())
    }

    pub fn register_partial(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&TagModel) -> HelperOutcome + 'static,
    ) -> Result<(), CompileError> {
        let name = name.into();
        validate_name(&name)?;
        self.partials.insert(name, Rc::new(callback));
        Ok(())
    }

    /// Registers a partial whose body is a constant template fragment rather
    /// than a computed callback (the "plain string instead of a callback"
    /// case from §4.C).
    pub fn register_partial_template(
        &mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<(), CompileError> {
        let template = template.into();
        self.register_partial(name, move |_tag| HelperOutcome::Value(template.clone()))
    }

    pub fn lookup_helper(&self, name: &str) -> Callback {
        self.helpers
            .get(name)
            .or_else(|| self.helpers.get(ESCAPED_FALLBACK))
            .expect("__escaped__ fallback must always be registered")
            .clone()
    }

    pub fn lookup_unescaped(&self) -> Callback {
        self.helpers
            .get(UNESCAPED_FALLBACK)
            .expect("__unescaped__ fallback must always be registered")
            .clone()
    }

    pub fn lookup_block(&self, name: &str) -> Callback {
        if let Some(callback) = self.blocks.get(name) {
            return callback.clone();
        }
        let missing = name.to_string();
        Rc::new(move |_tag| {
            HelperOutcome::Error(CompileError::HelperNotRegistered {
                name: missing.clone(),
            })
        })
    }

    pub fn lookup_partial(&self, name: &str) -> Callback {
        if let Some(callback) = self.partials.get(name) {
            return callback.clone();
        }
        let missing = name.to_string();
        Rc::new(move |_tag| {
            HelperOutcome::Error(CompileError::PartialNotRegistered {
                name: missing.clone(),
            })
        })
    }

    /// All registered helper and block-helper names, used to build the
    /// `HelperPrefixMatcher`. Excludes the reserved `__..__` sentinels.
    pub fn dispatchable_names(&self) -> Vec<String> {
        self.helpers
            .keys()
            .chain(self.blocks.keys())
            .filter(|name| !(name.starts_with("__") && name.ends_with("__")))
            .cloned()
            .collect()
    }
}
