#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Football tournament module: teams grouped into groups, served through a
//! hypermedia REST boundary with field selection, sorting and paging.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

use std::sync::Arc;

pub use api::rest::TournamentApi;
pub use config::{ConfigError, TournamentConfig};
pub use domain::error::DomainError;
pub use domain::service::Service;

use infra::memory::InMemoryTournament;

/// Wire an API over a seeded in-memory store.
///
/// # Errors
/// Returns `ConfigError::Invalid` if the configuration does not validate.
pub fn in_memory_api(config: &TournamentConfig) -> Result<TournamentApi, ConfigError> {
    config.validate()?;
    let store = Arc::new(InMemoryTournament::seeded());
    let svc = Arc::new(Service::new(store.clone(), store));
    TournamentApi::from_config(svc, config)
}
