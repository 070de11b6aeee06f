use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::PropertyValue;
use crate::error::{RepoDefError, Result};

/// An ordered map of loosely typed properties used to construct repository
/// definitions.
///
/// The bag is the construction input of every definition type: each type
/// reads the keys it recognizes through the typed accessors ([`string`],
/// [`integer`]) and ignores the rest. A value whose shape does not fit the
/// requested type is a fatal [`RepoDefError::InvalidProperty`].
///
/// [`string`]: PropertyBag::string
/// [`integer`]: PropertyBag::integer
///
/// # Example
///
/// ```
/// use reposource_core::PropertyBag;
///
/// let bag = PropertyBag::new()
///     .with("uri", "https://host/org/cfg.git")
///     .with("refresh", "30");
///
/// assert_eq!(bag.string("uri").unwrap().as_deref(), Some("https://host/org/cfg.git"));
/// assert_eq!(bag.integer("refresh").unwrap(), Some(30));
/// assert!(bag.string("branchName").unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PropertyBag {
    #[serde(flatten)]
    inner: IndexMap<String, PropertyValue>,
}

impl PropertyBag {
    /// Creates a new empty property bag.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Returns a reference to the internal map.
    pub fn as_inner(&self) -> &IndexMap<String, PropertyValue> {
        &self.inner
    }

    /// Returns true if the bag contains no properties.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Inserts a property.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns true if the key is present (even with a null value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Iterates over the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Retrieves a value by key, supporting dot notation for nested access.
    ///
    /// A key that exists verbatim (dots included) wins over a nested lookup.
    pub fn get(&self, path: &str) -> Option<&PropertyValue> {
        if path.is_empty() {
            return None;
        }

        if let Some(value) = self.inner.get(path) {
            return Some(value);
        }

        let mut parts = path.split('.');
        let mut current = self.inner.get(parts.next()?)?;

        for part in parts {
            current = current.as_object()?.get(part)?;
        }

        Some(current)
    }

    /// Reads a text property.
    ///
    /// Missing keys and null values yield `None`. Numbers and booleans are
    /// accepted and rendered as text; arrays and objects are rejected.
    pub fn string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None | Some(PropertyValue::Null) => Ok(None),
            Some(value) => value.to_text().map(Some).ok_or_else(|| {
                RepoDefError::invalid_property(
                    key,
                    format!("expected a string, found {}", value.type_name()),
                )
            }),
        }
    }

    /// Reads an integer property.
    ///
    /// Missing keys, null values and blank strings yield `None`. Integers and
    /// strings holding an integer are accepted; anything else is rejected.
    pub fn integer(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None | Some(PropertyValue::Null) => Ok(None),
            Some(PropertyValue::Integer(i)) => Ok(Some(*i)),
            Some(PropertyValue::String(s)) if s.trim().is_empty() => Ok(None),
            Some(PropertyValue::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                RepoDefError::invalid_property(key, format!("expected an integer, found '{}'", s))
            }),
            Some(value) => Err(RepoDefError::invalid_property(
                key,
                format!("expected an integer, found {}", value.type_name()),
            )),
        }
    }

    /// Returns the nested bag stored under `path`.
    ///
    /// Missing keys and null values yield `None`; any non-object value is
    /// rejected.
    pub fn child(&self, path: &str) -> Result<Option<PropertyBag>> {
        match self.get(path) {
            None | Some(PropertyValue::Null) => Ok(None),
            Some(PropertyValue::Object(map)) => Ok(Some(PropertyBag::from(map.clone()))),
            Some(value) => Err(RepoDefError::invalid_property(
                path,
                format!("expected an object, found {}", value.type_name()),
            )),
        }
    }

    /// Parses a JSON object into a PropertyBag.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RepoDefError::parse("json_source", e.to_string()))
    }

    /// Parses a YAML mapping into a PropertyBag.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RepoDefError::parse("yaml_source", e.to_string()))
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyBag {
    fn from(map: IndexMap<String, PropertyValue>) -> Self {
        PropertyBag { inner: map }
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyBag {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_access() {
        let yaml = r#"
service:
  repos:
    default:
      uri: https://host/org/cfg.git
      refresh: 10
"#;
        let bag = PropertyBag::from_yaml(yaml).unwrap();

        assert_eq!(
            bag.get("service.repos.default.uri").unwrap().as_str(),
            Some("https://host/org/cfg.git")
        );
        assert_eq!(bag.integer("service.repos.default.refresh").unwrap(), Some(10));

        assert_eq!(bag.get("service.repos.other"), None);
        assert_eq!(bag.get("service.repos.default.uri.sub"), None);
    }

    #[test]
    fn test_string_accepts_scalars() {
        let bag = PropertyBag::new()
            .with("password", 12345)
            .with("flag", true)
            .with("nothing", PropertyValue::Null);

        assert_eq!(bag.string("password").unwrap().as_deref(), Some("12345"));
        assert_eq!(bag.string("flag").unwrap().as_deref(), Some("true"));
        assert_eq!(bag.string("nothing").unwrap(), None);
        assert_eq!(bag.string("absent").unwrap(), None);
    }

    #[test]
    fn test_string_rejects_collections() {
        let bag = PropertyBag::new().with("username", vec!["a", "b"]);
        let err = bag.string("username").unwrap_err();

        assert!(err.is_invalid_property());
        assert!(err.to_string().contains("username"));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_integer_conversions() {
        let bag = PropertyBag::new()
            .with("a", 7)
            .with("b", " 15 ")
            .with("c", "")
            .with("d", "soon")
            .with("e", 2.5)
            .with("f", false);

        assert_eq!(bag.integer("a").unwrap(), Some(7));
        assert_eq!(bag.integer("b").unwrap(), Some(15));
        assert_eq!(bag.integer("c").unwrap(), None);
        assert!(bag.integer("d").unwrap_err().is_invalid_property());
        assert!(bag.integer("e").unwrap_err().is_invalid_property());
        assert!(bag.integer("f").unwrap_err().is_invalid_property());
    }

    #[test]
    fn test_child() {
        let bag = PropertyBag::from_json(r#"{"repos": {"a": {"uri": "x"}}, "flat": 1}"#).unwrap();

        let repos = bag.child("repos").unwrap().unwrap();
        assert_eq!(repos.keys().collect::<Vec<_>>(), vec!["a"]);
        assert!(bag.child("missing").unwrap().is_none());
        assert!(bag.child("flat").unwrap_err().is_invalid_property());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = PropertyBag::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, RepoDefError::Parse { .. }));
    }

    #[test]
    fn test_from_iter_preserves_order() {
        let bag: PropertyBag = vec![("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(bag.len(), 2);
    }
}
