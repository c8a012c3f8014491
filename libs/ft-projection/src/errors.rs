//! Error catalogue for query projection failures.

use ft_problem::ErrDef;

pub const INVALID_FIELDS: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Fields",
    code: "ft.projection.invalid_fields",
    type_url: "https://errors.football-tournament.dev/projection/invalid-fields",
};

pub const INVALID_ORDERBY: ErrDef = ErrDef {
    status: 400,
    title: "Invalid OrderBy",
    code: "ft.projection.invalid_orderby",
    type_url: "https://errors.football-tournament.dev/projection/invalid-orderby",
};

pub const INVALID_QUERY: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Query",
    code: "ft.projection.invalid_query",
    type_url: "https://errors.football-tournament.dev/projection/invalid-query",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "ft.projection.internal",
    type_url: "https://errors.football-tournament.dev/projection/internal",
};
