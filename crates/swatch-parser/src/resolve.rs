//! Variable resolution.
//!
//! A `@key.path` reference is looked up in the assignments made earlier in
//! the same file, then in whatever was loaded before the file. Both sides
//! are exposed through [`Bindings`], which the store implements.

use std::{collections::HashMap, hash::BuildHasher};

use indexmap::IndexMap;

use swatch_core::{identifier::KeyPath, value::RawValue};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
    stylesheet::Stylesheet,
};

/// Read access to values that variables may refer to.
pub trait Bindings {
    fn lookup(&self, path: &KeyPath) -> Option<&RawValue>;
}

/// Bindings with nothing in them, for parsing a file on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl Bindings for NoBindings {
    fn lookup(&self, _path: &KeyPath) -> Option<&RawValue> {
        None
    }
}

impl Bindings for Stylesheet {
    fn lookup(&self, path: &KeyPath) -> Option<&RawValue> {
        self.get(path)
    }
}

impl<S: BuildHasher> Bindings for HashMap<KeyPath, RawValue, S> {
    fn lookup(&self, path: &KeyPath) -> Option<&RawValue> {
        self.get(path)
    }
}

impl<S: BuildHasher> Bindings for IndexMap<KeyPath, RawValue, S> {
    fn lookup(&self, path: &KeyPath) -> Option<&RawValue> {
        self.get(path)
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn lookup(&self, path: &KeyPath) -> Option<&RawValue> {
        (**self).lookup(path)
    }
}

/// What a variable on a given line can see.
pub(crate) struct Scope<'a> {
    local: &'a Stylesheet,
    outer: &'a dyn Bindings,
    /// Path of the innermost open group, for suggestions.
    group: Option<&'a KeyPath>,
}

impl<'a> Scope<'a> {
    pub fn new(local: &'a Stylesheet, outer: &'a dyn Bindings, group: Option<&'a KeyPath>) -> Self {
        Self {
            local,
            outer,
            group,
        }
    }

    /// Resolve `path`, preferring this file's own earlier assignments.
    pub fn resolve(&self, path: &KeyPath, span: Span) -> Result<&'a RawValue, Diagnostic> {
        if let Some(value) = self.local.lookup(path).or_else(|| self.outer.lookup(path)) {
            return Ok(value);
        }

        let mut diagnostic = Diagnostic::error(format!("undefined key `{path}`"))
            .with_code(ErrorCode::E300)
            .with_label(span, "not defined before this line");

        let qualified = self
            .group
            .and_then(|group| {
                KeyPath::from_segments(group.segments().iter().chain(path.segments()).copied())
            })
            .filter(|qualified| {
                self.local.lookup(qualified).is_some() || self.outer.lookup(qualified).is_some()
            });

        diagnostic = match qualified {
            Some(qualified) => diagnostic.with_help(format!(
                "variables always use the full key path; did you mean `@{qualified}`?"
            )),
            None => diagnostic
                .with_help("a variable can only refer to a key assigned earlier or already loaded"),
        };
        Err(diagnostic)
    }

    /// Parse the text after `@` into a key path.
    pub fn parse_path(text: &str, span: Span) -> Result<KeyPath, Diagnostic> {
        KeyPath::parse(text).map_err(|err| {
            Diagnostic::error(format!("invalid variable `@{text}`"))
                .with_code(ErrorCode::E301)
                .with_label(span, err.to_string())
                .with_help("a variable is `@` followed by a dotted key path such as `@title.font`")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, stylesheet::Assignment};

    fn path(text: &str) -> KeyPath {
        KeyPath::parse(text).unwrap()
    }

    fn outer() -> HashMap<KeyPath, RawValue> {
        HashMap::from([
            (path("base.width"), RawValue::Number(320.0)),
            (path("shared"), RawValue::Number(1.0)),
        ])
    }

    #[test]
    fn test_local_shadows_outer() {
        let mut local = Stylesheet::new();
        local.push(Assignment::new(path("shared"), RawValue::Number(2.0), Span::default()));
        let outer = outer();
        let scope = Scope::new(&local, &outer, None);

        assert_eq!(
            scope.resolve(&path("shared"), Span::default()).unwrap(),
            &RawValue::Number(2.0)
        );
        assert_eq!(
            scope.resolve(&path("base.width"), Span::default()).unwrap(),
            &RawValue::Number(320.0)
        );
    }

    #[test]
    fn test_undefined_key() {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, &NoBindings, None);

        let diag = scope.resolve(&path("missing"), Span::new(3..11)).unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E300));
        assert_eq!(diag.kind(), Some(ErrorKind::UndefinedKey));
        assert_eq!(diag.primary_span(), Some(Span::new(3..11)));
    }

    #[test]
    fn test_suggests_full_path() {
        let local = Stylesheet::new();
        let outer = outer();
        let group = path("base");
        let scope = Scope::new(&local, &outer, Some(&group));

        let diag = scope.resolve(&path("width"), Span::default()).unwrap_err();
        assert!(diag.help().unwrap().contains("`@base.width`"));
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            Scope::parse_path("a.b", Span::default()).unwrap(),
            path("a.b")
        );
        let diag = Scope::parse_path("a..b", Span::default()).unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E301));
    }
}
