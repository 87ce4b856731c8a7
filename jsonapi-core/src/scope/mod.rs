//! Dot-path scoping into a decoded response payload.
//!
//! A path such as `data.actors.0.name` is walked one segment at a time:
//! objects are indexed by key, arrays by the segment parsed as a position.
//! A segment that cannot be resolved ends the walk with `None`; lookups never
//! fail loudly, the assertions built on top decide what absence means.

use std::fmt;

use serde_json::Value as JsonValue;

/// Resolve `path` against `root`. `None` as the path selects the root itself.
pub fn navigate<'a>(root: &'a JsonValue, path: Option<&str>) -> Option<&'a JsonValue> {
    let Some(path) = path else {
        return Some(root);
    };
    path.split('.').try_fold(root, |current, segment| match current {
        JsonValue::Object(map) => map.get(segment),
        JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// The active dot path that assertions are evaluated under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(Option<String>);

impl Scope {
    pub fn new(path: impl Into<String>) -> Self {
        Self(Some(path.into()))
    }

    pub fn path(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Replace the scope with `path`.
    pub fn select(&mut self, path: impl Into<String>) {
        self.0 = Some(path.into());
    }

    /// Descend into element `0` of the array property `name`.
    ///
    /// This only composes the path; whether it resolves is left to the next
    /// assertion.
    pub fn select_first_element(&mut self, name: &str) {
        self.0 = Some(match self.0.take() {
            None => format!("{name}.0"),
            Some(current) => format!("{current}.{name}.0"),
        });
    }

    pub fn resolve<'a>(&self, root: &'a JsonValue) -> Option<&'a JsonValue> {
        navigate(root, self.path())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or(""))
    }
}

/// A decoded payload viewed through the active scope.
#[derive(Debug, Clone, Copy)]
pub struct ScopedPayload<'a> {
    root: &'a JsonValue,
    scope: &'a Scope,
}

impl<'a> ScopedPayload<'a> {
    pub fn new(root: &'a JsonValue, scope: &'a Scope) -> Self {
        Self { root, scope }
    }

    pub fn scope(&self) -> &'a Scope {
        self.scope
    }

    /// The subtree selected by the scope, if it exists.
    pub fn current(&self) -> Option<&'a JsonValue> {
        self.scope.resolve(self.root)
    }

    /// Resolve `property` (itself a dot path) relative to the scoped subtree.
    pub fn get(&self, property: &str) -> Option<&'a JsonValue> {
        self.current().and_then(|v| navigate(v, Some(property)))
    }
}
