use std::sync::LazyLock;

use ft_projection::{Affordance, FieldKind, FieldTable, LinkedResource, Method, Resource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{Group, NewGroup, NewTeam, Team, TeamPatch, TeamUpdate};

/// REST DTO for team representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub points_scored: i32,
    pub win: i32,
    pub draw: i32,
    pub lost: i32,
    pub group_id: Option<Uuid>,
}

static TEAM_FIELDS: LazyLock<FieldTable<TeamDto>> = LazyLock::new(|| {
    FieldTable::<TeamDto>::new()
        .field("id", FieldKind::Uuid, |t| t.id.into())
        .field("name", FieldKind::String, |t| t.name.as_str().into())
        .field("description", FieldKind::String, |t| {
            t.description.as_str().into()
        })
        .field("pointsScored", FieldKind::I64, |t| t.points_scored.into())
        .field("win", FieldKind::I64, |t| t.win.into())
        .field("draw", FieldKind::I64, |t| t.draw.into())
        .field("lost", FieldKind::I64, |t| t.lost.into())
        .field("groupId", FieldKind::Uuid, |t| t.group_id.into())
});

impl Resource for TeamDto {
    const KIND: &'static str = "team";

    fn field_table() -> &'static FieldTable<Self> {
        &TEAM_FIELDS
    }
}

impl LinkedResource for TeamDto {
    const COLLECTION: &'static [&'static str] = &["teams"];
    const AFFORDANCES: &'static [Affordance] = &[
        Affordance::item("delete_team", Method::Delete),
        Affordance::collection("create_team", Method::Post),
        Affordance::item("update_team", Method::Put),
    ];

    fn identity(&self) -> String {
        self.id.to_string()
    }
}

/// REST DTO for group representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub id: Uuid,
    pub name: String,
}

static GROUP_FIELDS: LazyLock<FieldTable<GroupDto>> = LazyLock::new(|| {
    FieldTable::<GroupDto>::new()
        .field("id", FieldKind::Uuid, |g| g.id.into())
        .field("name", FieldKind::String, |g| g.name.as_str().into())
});

impl Resource for GroupDto {
    const KIND: &'static str = "group";

    fn field_table() -> &'static FieldTable<Self> {
        &GROUP_FIELDS
    }
}

impl LinkedResource for GroupDto {
    const COLLECTION: &'static [&'static str] = &["groups"];
    const AFFORDANCES: &'static [Affordance] =
        &[Affordance::collection("create_group", Method::Post)];

    fn identity(&self) -> String {
        self.id.to_string()
    }
}

/// REST DTO for creating a team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTeamReq {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// REST DTO for replacing a team's results (PUT)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTeamReq {
    pub points_scored: i32,
    pub win: i32,
    pub draw: i32,
    pub lost: i32,
    pub group_id: Option<Uuid>,
}

/// REST DTO for changing a team's name or description (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchTeamReq {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// REST DTO for creating a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateGroupReq {
    pub name: String,
}

// Conversion implementations between REST DTOs and domain models
impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            points_scored: team.points_scored,
            win: team.win,
            draw: team.draw,
            lost: team.lost,
            group_id: team.group_id,
        }
    }
}

impl From<Group> for GroupDto {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

impl From<CreateTeamReq> for NewTeam {
    fn from(req: CreateTeamReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

impl From<UpdateTeamReq> for TeamUpdate {
    fn from(req: UpdateTeamReq) -> Self {
        Self {
            points_scored: req.points_scored,
            win: req.win,
            draw: req.draw,
            lost: req.lost,
            group_id: req.group_id,
        }
    }
}

impl From<PatchTeamReq> for TeamPatch {
    fn from(req: PatchTeamReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

impl From<CreateGroupReq> for NewGroup {
    fn from(req: CreateGroupReq) -> Self {
        Self { name: req.name }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use ft_projection::{FieldSelection, shape};

    #[test]
    fn team_field_names_match_serialized_keys() {
        let dto = TeamDto::from(crate::infra::memory::seed::teams().remove(0));
        let serialized = serde_json::to_value(&dto).unwrap();
        let shaped = shape(&dto, &FieldSelection::all()).into_value();
        assert_eq!(serialized, shaped);
    }

    #[test]
    fn group_field_names_match_serialized_keys() {
        let dto = GroupDto::from(crate::infra::memory::seed::groups().remove(0));
        let serialized = serde_json::to_value(&dto).unwrap();
        let shaped = shape(&dto, &FieldSelection::all()).into_value();
        assert_eq!(serialized, shaped);
    }

    #[test]
    fn group_fields_are_not_team_fields() {
        assert!(ft_projection::type_has_fields::<GroupDto>(Some("id,name")));
        assert!(!ft_projection::type_has_fields::<GroupDto>(Some("win")));
    }

    #[test]
    fn create_team_rejects_unknown_members() {
        let res: Result<CreateTeamReq, _> =
            serde_json::from_str(r#"{"name":"A","colour":"red"}"#);
        assert!(res.is_err());
    }
}
