//! Functions callable from scaffold templates
//!
//! The set is fixed and enumerable through [`FunctionLibrary::NAMES`]:
//!
//! - `Pluralize(s)`, `Underscore(s)`, `ToUpper(s)`, `ToLower(s)`
//! - `set(n)` / `inc()` on a render-scoped [`SequenceCounter`]
//! - `is_tmp(type)`, `ret(type)`, `conv(expr, type, hint)` driven by
//!   [`ResolvedType`]
//!
//! ```text
//! {% set _ = set(0) %}
//! VALUES ({% for label, field in fields|items %}${{ inc() }}{% if not loop.last %}, {% endif %}{% endfor %})
//! ```

use minijinja::{Environment, Error, ErrorKind};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use super::field_type::{Hint, ResolvedType, FALLIBLE_MARKER};
use super::helpers::TemplateHelpers;

/// Integer cell behind `set`/`inc`
///
/// Clones share the same cell. Each compiled template gets its own counter.
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter(Arc<AtomicI64>);

impl SequenceCounter {
    /// Create a counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the counter, returning the new value
    pub fn set(&self, value: i64) -> i64 {
        self.0.store(value, Ordering::Relaxed);
        value
    }

    /// Increment the counter, returning the new value
    ///
    /// Returns `None` and leaves the counter unchanged at `i64::MAX`.
    pub fn inc(&self) -> Option<i64> {
        self.0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |value| value.checked_add(1))
            .ok()
            .map(|previous| previous + 1)
    }

    #[cfg(test)]
    pub(crate) fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// `Pluralize(s)`
#[must_use]
pub fn pluralize(value: &str) -> String {
    TemplateHelpers::pluralize(value)
}

/// `Underscore(s)`
#[must_use]
pub fn underscore(value: &str) -> String {
    TemplateHelpers::underscore(value)
}

/// `ToUpper(s)`
#[must_use]
pub fn to_upper(value: &str) -> String {
    value.to_uppercase()
}

/// `ToLower(s)`
#[must_use]
pub fn to_lower(value: &str) -> String {
    value.to_lowercase()
}

/// `is_tmp(type)`: true for `int16`, `int32` and `int64`
#[must_use]
pub fn is_tmp(resolved_type: &str) -> bool {
    ResolvedType::from_token(resolved_type).is_fixed_width()
}

/// `ret(type)`: `", _"` when parsing into `type` returns an error value
#[must_use]
pub fn ret(resolved_type: &str) -> &'static str {
    if ResolvedType::from_token(resolved_type).is_fallible() {
        FALLIBLE_MARKER
    } else {
        ""
    }
}

/// `conv(expr, type, hint)`: Go expression parsing `expr` into `type`
#[must_use]
pub fn conv(origin: &str, resolved_type: &str, hint: &str) -> String {
    ResolvedType::from_token(resolved_type).parse_expr(origin, Hint::from_token(hint))
}

/// Registry binding the template functions into an environment
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionLibrary;

impl FunctionLibrary {
    /// Every function name a template may call
    pub const NAMES: [&'static str; 9] = [
        "Pluralize",
        "Underscore",
        "ToUpper",
        "ToLower",
        "set",
        "inc",
        "is_tmp",
        "ret",
        "conv",
    ];

    /// Register all functions, binding `set`/`inc` to `counter`
    pub fn install(self, env: &mut Environment<'_>, counter: &SequenceCounter) {
        env.add_function("Pluralize", pluralize);
        env.add_function("Underscore", underscore);
        env.add_function("ToUpper", to_upper);
        env.add_function("ToLower", to_lower);

        let cell = counter.clone();
        env.add_function("set", move |value: i64| cell.set(value));
        let cell = counter.clone();
        env.add_function("inc", move || {
            cell.inc()
                .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "sequence counter overflow"))
        });

        env.add_function("is_tmp", is_tmp);
        env.add_function("ret", ret);
        env.add_function("conv", conv);
    }
}
