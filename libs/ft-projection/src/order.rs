//! Sort expressions.
//!
//! Sorting is a two-stage affair: [`OrderBy::parse`] turns the textual
//! `orderBy` parameter into an ordered list of keys without looking at any
//! type, and [`OrderBy::resolve`] validates those keys against a resource's
//! field table, producing a [`SortPlan`] that can no longer fail.
//!
//! Grammar: clauses are comma-separated; each clause is `field` or
//! `field <direction>`, and only a trailing literal ` desc` selects a
//! descending order.

use std::cmp::Ordering;
use std::fmt;

use crate::schema::{Accessor, FieldValue, Resource};
use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderKey {
    pub field: String,
    pub dir: SortDir,
}

/// Parsed, not yet validated, sort expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct OrderBy(Vec<OrderKey>);

impl OrderBy {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse a raw `orderBy` value. Blank input yields an empty order,
    /// meaning "keep the natural order".
    pub fn parse(raw: &str) -> Self {
        let mut order = Self::empty();
        for clause in raw.split(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            let dir = if clause.ends_with(" desc") {
                SortDir::Desc
            } else {
                SortDir::Asc
            };
            let token = clause.split_once(' ').map_or(clause, |(head, _)| head);
            order = order.clause(token, dir);
        }
        order
    }

    /// Append one clause. A token naming several comma-separated fields
    /// fans out into one key per field, all sharing `dir`.
    pub fn clause(mut self, token: &str, dir: SortDir) -> Self {
        self.0.extend(
            token
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(|f| OrderKey {
                    field: f.to_owned(),
                    dir,
                }),
        );
        self
    }

    #[must_use]
    pub fn keys(&self) -> &[OrderKey] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Validate every key against `R` and bind it to the field accessor.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrderByField` for a key naming no field of `R`,
    /// and `Error::UnsortableField` for a field declared as not orderable.
    pub fn resolve<R: Resource>(&self) -> Result<SortPlan<R>, Error> {
        let table = R::field_table();
        let mut steps = Vec::with_capacity(self.0.len());
        for key in &self.0 {
            let field = table
                .get(&key.field)
                .ok_or_else(|| Error::InvalidOrderByField(key.field.clone()))?;
            if !field.is_sortable() {
                return Err(Error::UnsortableField(field.name().to_owned()));
            }
            steps.push(SortStep {
                field: field.name(),
                get: field.accessor(),
                dir: key.dir,
            });
        }
        Ok(SortPlan { steps })
    }

    /// Validate without keeping the plan.
    ///
    /// # Errors
    /// Same as [`OrderBy::resolve`].
    pub fn validate_for<R: Resource>(&self) -> Result<(), Error> {
        self.resolve::<R>().map(|_| ())
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(none)");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let dir = match key.dir {
                SortDir::Asc => "asc",
                SortDir::Desc => "desc",
            };
            write!(f, "{} {dir}", key.field)?;
        }
        Ok(())
    }
}

struct SortStep<R> {
    field: &'static str,
    get: Accessor<R>,
    dir: SortDir,
}

/// A sort expression bound to a concrete resource type.
#[must_use]
pub struct SortPlan<R> {
    steps: Vec<SortStep<R>>,
}

impl<R> SortPlan<R> {
    /// A plan that keeps the input order.
    pub fn unsorted() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolved `(field, direction)` pairs, in precedence order.
    pub fn clauses(&self) -> impl Iterator<Item = (&'static str, SortDir)> + '_ {
        self.steps.iter().map(|s| (s.field, s.dir))
    }

    /// Stable lexicographic sort: the first clause dominates, later clauses
    /// only break ties, and full ties keep their input order.
    #[must_use]
    pub fn apply(&self, items: Vec<R>) -> Vec<R> {
        if self.steps.is_empty() {
            return items;
        }
        let mut keyed: Vec<(Vec<FieldValue>, R)> = items
            .into_iter()
            .map(|item| {
                let key = self.steps.iter().map(|s| (s.get)(&item)).collect();
                (key, item)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare_keys(a, b));
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    fn compare_keys(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        self.steps
            .iter()
            .zip(a.iter().zip(b))
            .map(|(step, (x, y))| step.dir.apply(x.cmp(y)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl<R> fmt::Debug for SortPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clauses()).finish()
    }
}

/// Parse, validate and apply a raw `orderBy` value in one step.
///
/// # Errors
/// Returns the validation errors of [`OrderBy::resolve`]; on error the input
/// collection is dropped untouched.
pub fn apply_sort<R: Resource>(items: Vec<R>, raw: &str) -> Result<Vec<R>, Error> {
    if raw.trim().is_empty() {
        return Ok(items);
    }
    let plan = OrderBy::parse(raw).resolve::<R>()?;
    Ok(plan.apply(items))
}
