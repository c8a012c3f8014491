//! Mapping from projection errors to Problem (pure data).
//!
//! The REST layer adds the instance path and trace id before the Problem is
//! turned into a response.

use ft_problem::Problem;

use crate::errors::{INTERNAL, INVALID_FIELDS, INVALID_ORDERBY, INVALID_QUERY};
use crate::Error;

impl From<Error> for Problem {
    fn from(err: Error) -> Self {
        let detail = err.to_string();
        match err {
            Error::InvalidField(_) => INVALID_FIELDS.as_param_problem("fields", detail),

            Error::InvalidOrderByField(_)
            | Error::UnsortableField(_)
            | Error::TooManyOrderByFields { .. } => {
                INVALID_ORDERBY.as_param_problem("orderBy", detail)
            }

            Error::QueryTooLong { parameter, .. } => {
                INVALID_QUERY.as_param_problem(parameter, detail)
            }

            Error::InvalidQuery(_) => INVALID_QUERY.as_problem(detail),

            Error::InvalidBaseUrl(msg) => {
                tracing::error!(error = %msg, "link base address is misconfigured");
                INTERNAL.as_problem("An internal error occurred while rendering links")
            }
        }
    }
}
