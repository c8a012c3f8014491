//! Tournament entities and the inputs that create or change them.

use uuid::Uuid;

/// Maximum length of a team name, in characters.
pub const TEAM_NAME_MAX_LEN: usize = 30;
/// Maximum length of a team description, in characters.
pub const TEAM_DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub points_scored: i32,
    pub win: i32,
    pub draw: i32,
    pub lost: i32,
    pub group_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

/// Data for creating a team. Results start at zero and the team is not
/// assigned to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
}

/// Full replacement of a team's results and group membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamUpdate {
    pub points_scored: i32,
    pub win: i32,
    pub draw: i32,
    pub lost: i32,
    pub group_id: Option<Uuid>,
}

/// Partial update of a team's name and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TeamPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
}

impl Team {
    /// A fresh team with a generated id.
    #[must_use]
    pub fn create(new: NewTeam) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description.unwrap_or_default(),
            points_scored: 0,
            win: 0,
            draw: 0,
            lost: 0,
            group_id: None,
        }
    }

    pub fn apply_update(&mut self, update: TeamUpdate) {
        self.points_scored = update.points_scored;
        self.win = update.win;
        self.draw = update.draw;
        self.lost = update.lost;
        self.group_id = update.group_id;
    }

    pub fn apply_patch(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl Group {
    #[must_use]
    pub fn create(new: NewGroup) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
        }
    }
}
