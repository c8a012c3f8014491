//! Static error definitions.
//!
//! Each endpoint family declares its catalogue as `pub const` [`ErrDef`]s and
//! turns them into [`Problem`]s with a per-occurrence detail.

use crate::problem::{InvalidParam, Problem};
use http::StatusCode;

/// Catalogue entry: everything about an error except the occurrence detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Build a Problem carrying this definition and the given detail.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail)
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Build a Problem that also names the offending query/body parameter.
    pub fn as_param_problem(
        &self,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Problem {
        let reason = reason.into();
        self.as_problem(reason.clone())
            .with_invalid_params(vec![InvalidParam {
                name: param.into(),
                reason,
            }])
    }
}
