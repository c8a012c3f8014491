use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::model::{Group, Team};

/// Port for the domain layer: persistence operations the service needs.
///
/// Listing operations return the whole candidate collection; sorting and
/// paging happen above this trait. Object-safe and async-friendly via
/// `async_trait`.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// All teams in insertion order.
    async fn list_teams(&self) -> Vec<Team>;

    async fn find_team(&self, id: Uuid) -> Option<Team>;

    async fn insert_team(&self, team: Team);

    /// Replace the stored team with the same id. Returns false if there was none.
    async fn update_team(&self, team: Team) -> bool;

    /// Returns true if a team was deleted.
    async fn delete_team(&self, id: Uuid) -> bool;

    /// All groups in insertion order.
    async fn list_groups(&self) -> Vec<Group>;

    async fn find_group(&self, id: Uuid) -> Option<Group>;

    async fn group_exists(&self, id: Uuid) -> bool;

    async fn insert_group(&self, group: Group);

    /// Teams assigned to `group_id`, ordered by points scored (ascending).
    async fn list_teams_for_group(&self, group_id: Uuid) -> Vec<Team>;
}

/// Uniqueness rule for team names, checked before a team is stored.
#[async_trait]
pub trait TeamNameCheck: Send + Sync {
    /// Exact, case-sensitive match against existing team names.
    async fn is_name_taken(&self, name: &str) -> bool;
}
