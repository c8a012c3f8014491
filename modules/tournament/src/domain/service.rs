use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Group, NewGroup, NewTeam, TEAM_DESCRIPTION_MAX_LEN, TEAM_NAME_MAX_LEN, Team, TeamPatch,
    TeamUpdate,
};
use crate::domain::repo::{TeamNameCheck, TournamentRepository};

/// Domain service with the business rules for teams and groups.
///
/// It hands back whole candidate collections; selecting, sorting and paging
/// them is the REST layer's job.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn TournamentRepository>,
    names: Arc<dyn TeamNameCheck>,
}

impl Service {
    /// Create a service with dependencies.
    #[must_use]
    pub fn new(repo: Arc<dyn TournamentRepository>, names: Arc<dyn TeamNameCheck>) -> Self {
        Self { repo, names }
    }

    #[instrument(skip(self))]
    pub async fn list_teams(&self) -> Vec<Team> {
        let teams = self.repo.list_teams().await;
        debug!(count = teams.len(), "Listed teams");
        teams
    }

    /// # Errors
    /// `DomainError::TeamNotFound` if no team has this id.
    #[instrument(skip(self), fields(team_id = %id))]
    pub async fn get_team(&self, id: Uuid) -> Result<Team, DomainError> {
        debug!("Getting team by id");
        self.repo
            .find_team(id)
            .await
            .ok_or_else(|| DomainError::team_not_found(id))
    }

    /// # Errors
    /// `DomainError::Validation` for a missing or oversized name or an
    /// oversized description, `DomainError::TeamNameTaken` if another team
    /// already uses the name.
    #[instrument(skip(self, new_team), fields(name = %new_team.name))]
    pub async fn create_team(&self, new_team: NewTeam) -> Result<Team, DomainError> {
        validate_name(&new_team.name)?;
        if let Some(description) = &new_team.description {
            validate_description(description)?;
        }
        if self.names.is_name_taken(&new_team.name).await {
            debug!("Team name already taken");
            return Err(DomainError::team_name_taken(new_team.name));
        }

        let team = Team::create(new_team);
        self.repo.insert_team(team.clone()).await;
        info!(team_id = %team.id, "Created team");
        Ok(team)
    }

    /// Replace a team's results and group membership.
    ///
    /// # Errors
    /// `DomainError::TeamNotFound` for an unknown team and
    /// `DomainError::GroupNotFound` when `update.group_id` names no group.
    #[instrument(skip(self, update), fields(team_id = %id))]
    pub async fn update_team(&self, id: Uuid, update: TeamUpdate) -> Result<(), DomainError> {
        let mut team = self.get_team(id).await?;
        if let Some(group_id) = update.group_id
            && !self.repo.group_exists(group_id).await
        {
            return Err(DomainError::group_not_found(group_id));
        }

        team.apply_update(update);
        if !self.repo.update_team(team).await {
            return Err(DomainError::team_not_found(id));
        }
        info!("Updated team");
        Ok(())
    }

    /// Change a team's name and/or description.
    ///
    /// The patched team is validated as a whole; a new name must also be
    /// free. Keeping the current name is not a conflict.
    ///
    /// # Errors
    /// `DomainError::TeamNotFound`, `DomainError::Validation` or
    /// `DomainError::TeamNameTaken`.
    #[instrument(skip(self, patch), fields(team_id = %id))]
    pub async fn patch_team(&self, id: Uuid, patch: TeamPatch) -> Result<(), DomainError> {
        let mut team = self.get_team(id).await?;
        if patch.is_empty() {
            debug!("Empty patch, nothing to do");
            return Ok(());
        }

        let renamed = patch.name.as_ref().filter(|name| **name != team.name).cloned();
        team.apply_patch(patch);
        validate_name(&team.name)?;
        validate_description(&team.description)?;
        if let Some(name) = renamed
            && self.names.is_name_taken(&name).await
        {
            return Err(DomainError::team_name_taken(name));
        }

        if !self.repo.update_team(team).await {
            return Err(DomainError::team_not_found(id));
        }
        info!("Patched team");
        Ok(())
    }

    /// # Errors
    /// `DomainError::TeamNotFound` if no team has this id.
    #[instrument(skip(self), fields(team_id = %id))]
    pub async fn delete_team(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete_team(id).await {
            return Err(DomainError::team_not_found(id));
        }
        info!("Deleted team");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> Vec<Group> {
        let groups = self.repo.list_groups().await;
        debug!(count = groups.len(), "Listed groups");
        groups
    }

    /// # Errors
    /// `DomainError::GroupNotFound` if no group has this id.
    #[instrument(skip(self), fields(group_id = %id))]
    pub async fn get_group(&self, id: Uuid) -> Result<Group, DomainError> {
        self.repo
            .find_group(id)
            .await
            .ok_or_else(|| DomainError::group_not_found(id))
    }

    /// Teams of one group, ordered by points scored.
    ///
    /// # Errors
    /// `DomainError::GroupNotFound` if no group has this id.
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn list_teams_for_group(&self, group_id: Uuid) -> Result<Vec<Team>, DomainError> {
        if !self.repo.group_exists(group_id).await {
            return Err(DomainError::group_not_found(group_id));
        }
        let teams = self.repo.list_teams_for_group(group_id).await;
        debug!(count = teams.len(), "Listed teams for group");
        Ok(teams)
    }

    /// # Errors
    /// `DomainError::Validation` if the name is blank.
    #[instrument(skip(self, new_group), fields(name = %new_group.name))]
    pub async fn create_group(&self, new_group: NewGroup) -> Result<Group, DomainError> {
        if new_group.name.trim().is_empty() {
            return Err(DomainError::validation("name", "You should fill out a name."));
        }
        let group = Group::create(new_group);
        self.repo.insert_group(group.clone()).await;
        info!(group_id = %group.id, "Created group");
        Ok(group)
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "You should fill out a name."));
    }
    let len = name.chars().count();
    if len > TEAM_NAME_MAX_LEN {
        return Err(DomainError::validation(
            "name",
            format!("The name shouldn't have more than {TEAM_NAME_MAX_LEN} characters (got {len})."),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    let len = description.chars().count();
    if len > TEAM_DESCRIPTION_MAX_LEN {
        return Err(DomainError::validation(
            "description",
            format!(
                "The description shouldn't have more than {TEAM_DESCRIPTION_MAX_LEN} characters (got {len})."
            ),
        ));
    }
    Ok(())
}
