//! Field selection ("data shaping").
//!
//! A [`FieldSelection`] is parsed from the comma-separated `fields` query
//! parameter, validated against a resource type's [`FieldTable`] before any
//! data is fetched, and then used to project resources into
//! [`ShapedResource`] maps.
//!
//! [`FieldTable`]: crate::schema::FieldTable

use serde::Serialize;
use serde_json::{Map, Value};

use crate::links::Link;
use crate::schema::Resource;
use crate::Error;

/// Key under which hypermedia links are appended to a shaped resource.
pub const LINKS_KEY: &str = "links";

/// Requested field names, in request order. Empty means "all fields".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct FieldSelection(Vec<String>);

impl FieldSelection {
    /// Select every declared field.
    pub fn all() -> Self {
        Self(Vec::new())
    }

    /// Parse a raw `fields` parameter. Names are trimmed and blanks dropped,
    /// so `None`, `""` and `" , "` all mean "all fields".
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::all();
        };
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Check every requested name against `R`'s declared fields.
    ///
    /// # Errors
    /// Returns `Error::InvalidField` naming the first requested field that has
    /// no case-insensitive match on `R`.
    pub fn validate_for<R: Resource>(&self) -> Result<(), Error> {
        let table = R::field_table();
        match self.0.iter().find(|name| !table.contains(name)) {
            Some(unknown) => {
                tracing::debug!(kind = R::KIND, field = %unknown, "unknown field requested");
                Err(Error::InvalidField(unknown.clone()))
            }
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn is_valid_for<R: Resource>(&self) -> bool {
        self.validate_for::<R>().is_ok()
    }

    /// Comma-joined form, for reproducing the selection in links.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        if self.is_all() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

/// Whether every name in a raw `fields` parameter exists on `R`.
#[must_use]
pub fn type_has_fields<R: Resource>(raw: Option<&str>) -> bool {
    FieldSelection::parse(raw).is_valid_for::<R>()
}

/// A resource projected to a runtime-chosen set of fields.
///
/// Keys keep insertion order: the requested order, or declaration order for
/// an unrestricted selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedResource(Map<String, Value>);

impl ShapedResource {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a `links` entry after the shaped fields.
    pub fn insert_links(&mut self, links: &[Link]) {
        let links = links
            .iter()
            .map(|l| serde_json::to_value(l).unwrap_or(Value::Null))
            .collect();
        self.0.insert(LINKS_KEY.to_owned(), Value::Array(links));
    }

    #[must_use]
    pub fn with_links(mut self, links: &[Link]) -> Self {
        self.insert_links(links);
        self
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<ShapedResource> for Value {
    fn from(shaped: ShapedResource) -> Self {
        shaped.into_value()
    }
}

/// Project one resource down to the selected fields.
///
/// The selection is expected to have been validated with
/// [`FieldSelection::validate_for`]; names without a match are skipped.
/// Output keys use the declared spelling of each field.
#[must_use]
pub fn shape<R: Resource>(resource: &R, selection: &FieldSelection) -> ShapedResource {
    let table = R::field_table();
    let mut out = Map::new();
    if selection.is_all() {
        for field in table {
            out.insert(field.name().to_owned(), field.read(resource).into());
        }
    } else {
        for name in selection.names() {
            if let Some(field) = table.get(name) {
                out.insert(field.name().to_owned(), field.read(resource).into());
            }
        }
    }
    ShapedResource(out)
}

/// Apply the same selection to every resource of a sequence.
#[must_use]
pub fn shape_all<'a, R, I>(resources: I, selection: &FieldSelection) -> Vec<ShapedResource>
where
    R: Resource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    resources
        .into_iter()
        .map(|r| shape(r, selection))
        .collect()
}
