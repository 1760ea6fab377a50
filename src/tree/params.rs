use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// The path parameters captured while resolving a route.
///
/// Every resolution allocates its own set.  If the same name is captured
/// twice on one path (e.g. `/:a/x/:a`), the later segment wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<Arc<str>, String>);

impl Params {
    pub(crate) fn insert(&mut self, name: Arc<str>, value: String) {
        self.0.insert(name, value);
    }

    /// Retrieves the raw value captured under the given name.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::tree::TreeBuilder;
    /// let mut builder = TreeBuilder::new();
    /// builder.add_route("GET /:first/:second", ())?;
    /// let tree = builder.finish();
    /// let params = tree.resolve(&http::Method::GET, &["foo", "bar"]).into_params().unwrap();
    /// assert_eq!(params.get("first"), Some("foo"));
    /// assert_eq!(params.get("second"), Some("bar"));
    /// assert_eq!(params.get("third"), None);
    /// # Ok::<(), trailhead::RouterError>(())
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Retrieves the value captured under the given name, and parses it.
    /// Returns `None` both when nothing was captured and when parsing fails.
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.parse().ok())
    }

    /// The number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the captured names and values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .map(|(name, value)| (&**name, value.as_str()))
    }
}

impl<'p> IntoIterator for &'p Params {
    type Item = (&'p str, &'p str);
    type IntoIter = Box<dyn Iterator<Item = (&'p str, &'p str)> + 'p>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
