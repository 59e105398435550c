//! Template types for typed variable injection.
//!
//! Placeholders look like `__NAME__`. Substitution is a single pass over the
//! template, so values are never rescanned for placeholders.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z][A-Z_]*[A-Z])__").unwrap());

/// Trait for template variable sets
pub trait TemplateVars {
    /// Value for placeholder `name` (without underscores), if this set has one.
    fn get(&self, name: &str) -> Option<&str>;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    /// Render the template. Unknown placeholders are left untouched.
    pub fn render(&self, vars: &V) -> String {
        match PLACEHOLDER.replace_all(self.content, |caps: &Captures<'_>| {
            vars.get(&caps[1]).unwrap_or(&caps[0]).to_string()
        }) {
            Cow::Borrowed(content) => content.to_string(),
            Cow::Owned(content) => content,
        }
    }
}
