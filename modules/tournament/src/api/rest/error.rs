use ft_problem::{ErrDef, Problem};

use crate::domain::error::DomainError;

pub const TEAM_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Team Not Found",
    code: "ft.tournament.team_not_found",
    type_url: "https://errors.football-tournament.dev/tournament/team-not-found",
};

pub const GROUP_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Group Not Found",
    code: "ft.tournament.group_not_found",
    type_url: "https://errors.football-tournament.dev/tournament/group-not-found",
};

pub const TEAM_NAME_TAKEN: ErrDef = ErrDef {
    status: 422,
    title: "Team Name Taken",
    code: "ft.tournament.team_name_taken",
    type_url: "https://errors.football-tournament.dev/tournament/team-name-taken",
};

pub const VALIDATION: ErrDef = ErrDef {
    status: 422,
    title: "Validation Failed",
    code: "ft.tournament.validation",
    type_url: "https://errors.football-tournament.dev/tournament/validation",
};

pub const INVALID_MEDIA_TYPE: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Media Type",
    code: "ft.tournament.invalid_media_type",
    type_url: "https://errors.football-tournament.dev/tournament/invalid-media-type",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "ft.tournament.internal",
    type_url: "https://errors.football-tournament.dev/tournament/internal",
};

/// Map domain error to RFC9457 Problem using the catalog
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::TeamNotFound { id } => {
            TEAM_NOT_FOUND.as_problem(format!("Team with id {id} was not found"))
        }
        DomainError::GroupNotFound { id } => {
            GROUP_NOT_FOUND.as_problem(format!("Group with id {id} was not found"))
        }
        DomainError::TeamNameTaken { name } => TEAM_NAME_TAKEN
            .as_param_problem("name", format!("Team names must be different; '{name}' is taken")),
        DomainError::Validation { field, message } => {
            VALIDATION.as_param_problem(field.as_str(), message.as_str())
        }
        DomainError::Projection(err) => {
            tracing::warn!(instance, error = %err, "Rejected query");
            Problem::from(err.clone())
        }
    };
    ft_problem::finalize(problem, instance)
}

/// Problem for a failure that is not the client's fault.
pub fn internal_problem(detail: &str, instance: &str) -> Problem {
    tracing::error!(detail, "Internal error while building a response");
    ft_problem::finalize(INTERNAL.as_problem("An internal error occurred"), instance)
}

/// 400 for an `Accept` header that is not a media type.
pub fn invalid_media_type(detail: &str, instance: &str) -> Problem {
    ft_problem::finalize(
        INVALID_MEDIA_TYPE.as_param_problem("Accept", format!("not a media type: {detail}")),
        instance,
    )
}

/// Implement Into<Problem> for `DomainError` so handlers can use `?`
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
