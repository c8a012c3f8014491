//! In-memory storage behind the repository ports.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::model::{Group, Team};
use crate::domain::repo::{TeamNameCheck, TournamentRepository};

/// Fixed ids and rows the store starts with when seeded.
pub mod seed {
    use uuid::{Uuid, uuid};

    use crate::domain::model::{Group, Team};

    pub const TEAM_1: Uuid = uuid!("d28888e9-2ba9-473a-a40f-e38cb54f9b35");
    pub const TEAM_2: Uuid = uuid!("5b3621c0-7b12-4e80-9c8b-3398cba7ee05");
    pub const GROUP_A: Uuid = uuid!("6f2b3b8e-4a61-4c0e-9d3e-0a1c5e7b2f01");
    pub const GROUP_B: Uuid = uuid!("6f2b3b8e-4a61-4c0e-9d3e-0a1c5e7b2f02");

    #[must_use]
    pub fn teams() -> Vec<Team> {
        vec![
            Team {
                id: TEAM_1,
                name: "Team1".to_owned(),
                description: "Description1".to_owned(),
                points_scored: 0,
                win: 0,
                draw: 0,
                lost: 0,
                group_id: Some(GROUP_B),
            },
            Team {
                id: TEAM_2,
                name: "Team2".to_owned(),
                description: "Description2".to_owned(),
                points_scored: 0,
                win: 0,
                draw: 0,
                lost: 0,
                group_id: None,
            },
        ]
    }

    #[must_use]
    pub fn groups() -> Vec<Group> {
        vec![
            Group {
                id: GROUP_A,
                name: "A".to_owned(),
            },
            Group {
                id: GROUP_B,
                name: "B".to_owned(),
            },
        ]
    }
}

/// Process-local store. Insertion order is the natural listing order.
#[derive(Debug, Default)]
pub struct InMemoryTournament {
    teams: RwLock<Vec<Team>>,
    groups: RwLock<Vec<Group>>,
}

impl InMemoryTournament {
    #[must_use]
    pub fn new(teams: Vec<Team>, groups: Vec<Group>) -> Self {
        Self {
            teams: RwLock::new(teams),
            groups: RwLock::new(groups),
        }
    }

    /// Two groups (`A`, `B`) and two teams, `Team1` in group `B`.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::teams(), seed::groups())
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.read().len()
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournament {
    async fn list_teams(&self) -> Vec<Team> {
        self.teams.read().clone()
    }

    async fn find_team(&self, id: Uuid) -> Option<Team> {
        self.teams.read().iter().find(|t| t.id == id).cloned()
    }

    async fn insert_team(&self, team: Team) {
        self.teams.write().push(team);
    }

    async fn update_team(&self, team: Team) -> bool {
        let mut teams = self.teams.write();
        match teams.iter_mut().find(|t| t.id == team.id) {
            Some(slot) => {
                *slot = team;
                true
            }
            None => false,
        }
    }

    async fn delete_team(&self, id: Uuid) -> bool {
        let mut teams = self.teams.write();
        let before = teams.len();
        teams.retain(|t| t.id != id);
        teams.len() != before
    }

    async fn list_groups(&self) -> Vec<Group> {
        self.groups.read().clone()
    }

    async fn find_group(&self, id: Uuid) -> Option<Group> {
        self.groups.read().iter().find(|g| g.id == id).cloned()
    }

    async fn group_exists(&self, id: Uuid) -> bool {
        self.groups.read().iter().any(|g| g.id == id)
    }

    async fn insert_group(&self, group: Group) {
        self.groups.write().push(group);
    }

    async fn list_teams_for_group(&self, group_id: Uuid) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .read()
            .iter()
            .filter(|t| t.group_id == Some(group_id))
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.points_scored);
        teams
    }
}

#[async_trait]
impl TeamNameCheck for InMemoryTournament {
    async fn is_name_taken(&self, name: &str) -> bool {
        self.teams.read().iter().any(|t| t.name == name)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn team(name: &str, points: i32, group_id: Option<Uuid>) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: String::new(),
            points_scored: points,
            win: 0,
            draw: 0,
            lost: 0,
            group_id,
        }
    }

    #[tokio::test]
    async fn teams_for_group_filtered_and_ordered_by_points() {
        let store = InMemoryTournament::new(
            vec![
                team("High", 9, Some(seed::GROUP_A)),
                team("Other", 1, Some(seed::GROUP_B)),
                team("Low", 3, Some(seed::GROUP_A)),
                team("Loose", 0, None),
            ],
            seed::groups(),
        );
        let names: Vec<String> = store
            .list_teams_for_group(seed::GROUP_A)
            .await
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Low", "High"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = InMemoryTournament::seeded();
        assert!(!store.update_team(team("Ghost", 0, None)).await);
        assert!(!store.delete_team(Uuid::new_v4()).await);
        assert!(store.delete_team(seed::TEAM_1).await);
        assert_eq!(store.team_count(), 1);
        assert!(store.find_team(seed::TEAM_1).await.is_none());
    }

    #[tokio::test]
    async fn name_check_is_exact() {
        let store = InMemoryTournament::seeded();
        assert!(store.is_name_taken("Team1").await);
        assert!(!store.is_name_taken("team1").await);
        assert!(!store.is_name_taken("Team3").await);
    }
}
