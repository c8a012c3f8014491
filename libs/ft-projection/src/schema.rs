//! Per-type field tables.
//!
//! A resource type declares, once, the fields it exposes to clients: the
//! wire name, the logical kind, whether it may appear in `orderBy`, and a
//! plain accessor function. Shaping and sorting work off this table, so no
//! runtime type introspection is needed and no code is duplicated per type.
//!
//! ```rust,ignore
//! static TABLE: LazyLock<FieldTable<CityDto>> = LazyLock::new(|| {
//!     FieldTable::<CityDto>::new()
//!         .field("id", FieldKind::Uuid, |c| c.id.into())
//!         .field("name", FieldKind::String, |c| c.name.as_str().into())
//! });
//!
//! impl Resource for CityDto {
//!     const KIND: &'static str = "city";
//!     fn field_table() -> &'static FieldTable<Self> {
//!         &TABLE
//!     }
//! }
//! ```

use std::cmp::Ordering;
use std::fmt;

use uuid::Uuid;

/// Logical field types a table entry can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I64,
    Bool,
    Uuid,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "String"),
            FieldKind::I64 => write!(f, "I64"),
            FieldKind::Bool => write!(f, "Bool"),
            FieldKind::Uuid => write!(f, "Uuid"),
        }
    }
}

/// A value read out of a resource through its field table.
///
/// Values of the same variant compare naturally (strings ordinally); `Null`
/// sorts before everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    I64(i64),
    String(String),
    Uuid(Uuid),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::I64(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::I64(a), FieldValue::I64(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::I64(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::I64(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::I64(v.into())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_owned())
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(b),
            FieldValue::I64(n) => serde_json::Value::from(n),
            FieldValue::String(s) => serde_json::Value::String(s),
            FieldValue::Uuid(u) => serde_json::Value::String(u.to_string()),
        }
    }
}

/// Reads one field out of a resource.
pub type Accessor<R> = fn(&R) -> FieldValue;

/// One declared field of a resource type.
pub struct Field<R> {
    name: &'static str,
    kind: FieldKind,
    sortable: bool,
    get: Accessor<R>,
}

impl<R> Field<R> {
    /// Declared (canonical) field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field may be used in an `orderBy` clause.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    #[must_use]
    pub fn accessor(&self) -> Accessor<R> {
        self.get
    }

    #[must_use]
    pub fn read(&self, resource: &R) -> FieldValue {
        (self.get)(resource)
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Ordered catalogue of the fields a resource type exposes.
///
/// Declaration order is preserved: it is the order of an unrestricted
/// shaping. Lookups are case-insensitive exact matches.
#[must_use]
pub struct FieldTable<R> {
    fields: Vec<Field<R>>,
}

impl<R> Default for FieldTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FieldTable<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a readable, sortable field.
    pub fn field(self, name: &'static str, kind: FieldKind, get: Accessor<R>) -> Self {
        self.push(name, kind, true, get)
    }

    /// Declare a readable field that cannot be used for ordering.
    pub fn unsortable(self, name: &'static str, kind: FieldKind, get: Accessor<R>) -> Self {
        self.push(name, kind, false, get)
    }

    fn push(mut self, name: &'static str, kind: FieldKind, sortable: bool, get: Accessor<R>) -> Self {
        debug_assert!(
            self.get(name).is_none(),
            "field '{name}' declared twice"
        );
        self.fields.push(Field {
            name,
            kind,
            sortable,
            get,
        });
        self
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<R>> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field<R>> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a, R> IntoIterator for &'a FieldTable<R> {
    type Item = &'a Field<R>;
    type IntoIter = std::slice::Iter<'a, Field<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<R> fmt::Debug for FieldTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

/// A record type whose fields can be shaped and sorted generically.
pub trait Resource: Sized + 'static {
    /// Human-readable kind, used in logs and error details.
    const KIND: &'static str;

    /// The type's field table, built once and shared by every request.
    fn field_table() -> &'static FieldTable<Self>;
}
