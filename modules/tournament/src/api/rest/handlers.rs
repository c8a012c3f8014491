//! Boundary handlers for teams and groups.
//!
//! Every list handler runs the same pipeline: bind the query string,
//! validate it against the DTO's field table (before touching storage),
//! fetch the candidate collection, then sort, page, shape and link it.

use std::sync::Arc;

use ft_problem::Problem;
use ft_projection::{
    FieldSelection, LinkBuilder, LinkedResource, ListQuery, PagedResult, QueryLimits,
    ResourceUriType, ShapedResource, shape,
};
use http::header::{CONTENT_TYPE, HeaderValue};
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::dto::{
    CreateGroupReq, CreateTeamReq, GroupDto, PatchTeamReq, TeamDto, UpdateTeamReq,
};
use super::error::{domain_error_to_problem, invalid_media_type};
use super::params::{GroupsParameters, ItemParameters, TeamsParameters};
use super::response::{
    ApiResult, HATEOAS_MEDIA_TYPE, allow, created_json, no_content, ok_json, with_pagination,
};
use crate::config::{ConfigError, TournamentConfig};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Methods served under `/teams`.
pub const TEAMS_ALLOW: &str = "GET,OPTIONS,POST,PUT,PATCH,DELETE";
/// Methods served under `/groups`.
pub const GROUPS_ALLOW: &str = "GET,OPTIONS,POST";

/// Turns any error convertible to `DomainError` into a Problem for `instance`.
fn reject<E: Into<DomainError>>(instance: &str) -> impl FnOnce(E) -> Problem + '_ {
    move |e| domain_error_to_problem(&e.into(), instance)
}

/// REST surface of the tournament module.
#[derive(Clone)]
pub struct TournamentApi {
    svc: Arc<Service>,
    links: LinkBuilder,
    limits: QueryLimits,
}

impl TournamentApi {
    #[must_use]
    pub fn new(svc: Arc<Service>, links: LinkBuilder, limits: QueryLimits) -> Self {
        Self { svc, links, limits }
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` if the configured base URL is unusable.
    pub fn from_config(svc: Arc<Service>, config: &TournamentConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(svc, config.link_builder()?, config.query_limits()))
    }

    #[must_use]
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    // ---- teams -------------------------------------------------------------

    /// `GET /teams?fields=&orderBy=&pageNumber=&pageSize=`
    ///
    /// # Errors
    /// 400 for a malformed query, an unknown field or an unknown sort key.
    #[instrument(skip(self))]
    pub async fn get_teams(&self, query: &str) -> ApiResult {
        let instance = "/teams";
        let params = TeamsParameters::from_query(query).map_err(reject(instance))?;
        let list = ListQuery::<TeamDto>::new(&params, &self.limits).map_err(reject(instance))?;

        let teams = self
            .svc
            .list_teams()
            .await
            .into_iter()
            .map(TeamDto::from)
            .collect();
        let page = list.run(teams);
        info!(
            total = page.total_count(),
            page = page.current_page(),
            "Listing teams"
        );
        self.collection_response(&[String::from("teams")], &list, &page, instance)
    }

    /// `GET /teams/{id}?fields=`
    ///
    /// # Errors
    /// 400 for an unknown field, 404 when the team does not exist.
    #[instrument(skip(self), fields(team_id = %id))]
    pub async fn get_team(&self, id: Uuid, query: &str) -> ApiResult {
        let instance = format!("/teams/{id}");
        let (fields, selection) = self.item_selection::<TeamDto>(query, &instance)?;

        let team = TeamDto::from(self.svc.get_team(id).await.map_err(reject(&instance))?);
        let links = self.links.resource_links(&team, fields.as_deref());
        Ok(ok_json(shape(&team, &selection).with_links(&links).into_value()))
    }

    /// `POST /teams`
    ///
    /// # Errors
    /// 422 for an invalid or taken name or an oversized description.
    #[instrument(skip(self, body), fields(name = %body.name))]
    pub async fn create_team(&self, body: CreateTeamReq) -> ApiResult {
        let instance = "/teams";
        let team = TeamDto::from(
            self.svc
                .create_team(body.into())
                .await
                .map_err(reject(instance))?,
        );
        let location = self.links.item_href::<TeamDto>(&team.identity(), None);
        created_json(self.linked(&team), &location, instance)
    }

    /// `PUT /teams/{id}`
    ///
    /// # Errors
    /// 404 when the team or the referenced group does not exist.
    #[instrument(skip(self, body), fields(team_id = %id))]
    pub async fn update_team(&self, id: Uuid, body: UpdateTeamReq) -> ApiResult {
        let instance = format!("/teams/{id}");
        self.svc
            .update_team(id, body.into())
            .await
            .map_err(reject(&instance))?;
        Ok(no_content())
    }

    /// `PATCH /teams/{id}`
    ///
    /// # Errors
    /// 404 for an unknown team, 422 when the patched team is invalid.
    #[instrument(skip(self, body), fields(team_id = %id))]
    pub async fn partially_update_team(&self, id: Uuid, body: PatchTeamReq) -> ApiResult {
        let instance = format!("/teams/{id}");
        self.svc
            .patch_team(id, body.into())
            .await
            .map_err(reject(&instance))?;
        Ok(no_content())
    }

    /// `DELETE /teams/{id}`
    ///
    /// # Errors
    /// 404 when the team does not exist.
    #[instrument(skip(self), fields(team_id = %id))]
    pub async fn delete_team(&self, id: Uuid) -> ApiResult {
        let instance = format!("/teams/{id}");
        self.svc.delete_team(id).await.map_err(reject(&instance))?;
        Ok(no_content())
    }

    /// `OPTIONS /teams`
    #[must_use]
    pub fn teams_options() -> super::ApiResponse {
        allow(TEAMS_ALLOW)
    }

    // ---- groups ------------------------------------------------------------

    /// `GET /groups?fields=&orderBy=&pageNumber=&pageSize=`
    ///
    /// # Errors
    /// 400 for a malformed query or a name that is not a group field.
    #[instrument(skip(self))]
    pub async fn get_groups(&self, query: &str) -> ApiResult {
        let instance = "/groups";
        let params = GroupsParameters::from_query(query).map_err(reject(instance))?;
        let list = ListQuery::<GroupDto>::new(&params, &self.limits).map_err(reject(instance))?;

        let groups = self
            .svc
            .list_groups()
            .await
            .into_iter()
            .map(GroupDto::from)
            .collect();
        let page = list.run(groups);
        self.collection_response(&[String::from("groups")], &list, &page, instance)
    }

    /// `GET /groups/{id}?fields=` with content negotiation on `Accept`.
    ///
    /// With [`HATEOAS_MEDIA_TYPE`] the group carries its links; any other
    /// parseable media type gets the plain shaped group. A missing header
    /// counts as `application/json`.
    ///
    /// # Errors
    /// 400 for an unparseable `Accept` or an unknown field, 404 when the
    /// group does not exist.
    #[instrument(skip(self), fields(group_id = %id))]
    pub async fn get_group(&self, id: Uuid, query: &str, accept: Option<&str>) -> ApiResult {
        let instance = format!("/groups/{id}");
        let media_type = match accept.unwrap_or("application/json").parse::<mime::Mime>() {
            Ok(m) => m,
            Err(e) => {
                warn!(accept, error = %e, "Unparseable Accept header");
                return Err(invalid_media_type(&e.to_string(), &instance));
            }
        };
        let (fields, selection) = self.item_selection::<GroupDto>(query, &instance)?;

        let group = GroupDto::from(self.svc.get_group(id).await.map_err(reject(&instance))?);
        let shaped = shape(&group, &selection);

        if media_type.essence_str() == HATEOAS_MEDIA_TYPE {
            debug!("Hypermedia representation requested");
            let links = self.links.resource_links(&group, fields.as_deref());
            let mut resp = ok_json(shaped.with_links(&links).into_value());
            resp.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static(HATEOAS_MEDIA_TYPE),
            );
            return Ok(resp);
        }
        Ok(ok_json(shaped.into_value()))
    }

    /// `GET /groups/{id}/teams?fields=&orderBy=&pageNumber=&pageSize=`
    ///
    /// Without `orderBy` the teams come in the store's order, by points
    /// scored.
    ///
    /// # Errors
    /// 400 for a bad query, 404 when the group does not exist.
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn get_teams_for_group(&self, group_id: Uuid, query: &str) -> ApiResult {
        let instance = format!("/groups/{group_id}/teams");
        let params = GroupsParameters::from_query(query).map_err(reject(&instance))?;
        let list = ListQuery::<TeamDto>::new(&params, &self.limits).map_err(reject(&instance))?;

        let teams = self
            .svc
            .list_teams_for_group(group_id)
            .await
            .map_err(reject(&instance))?
            .into_iter()
            .map(TeamDto::from)
            .collect();
        let page = list.run(teams);
        let segments = [
            String::from("groups"),
            group_id.to_string(),
            String::from("teams"),
        ];
        self.collection_response(&segments, &list, &page, &instance)
    }

    /// `POST /groups`
    ///
    /// # Errors
    /// 422 when the name is blank.
    #[instrument(skip(self, body), fields(name = %body.name))]
    pub async fn create_group(&self, body: CreateGroupReq) -> ApiResult {
        let instance = "/groups";
        let group = GroupDto::from(
            self.svc
                .create_group(body.into())
                .await
                .map_err(reject(instance))?,
        );
        let location = self.links.item_href::<GroupDto>(&group.identity(), None);
        created_json(self.linked(&group), &location, instance)
    }

    /// `OPTIONS /groups`
    #[must_use]
    pub fn groups_options() -> super::ApiResponse {
        allow(GROUPS_ALLOW)
    }

    // ---- shared pipeline steps --------------------------------------------

    /// Bind and validate `fields` for a single-resource read.
    fn item_selection<R: LinkedResource>(
        &self,
        query: &str,
        instance: &str,
    ) -> Result<(Option<String>, FieldSelection), Problem> {
        let params = ItemParameters::from_query(query).map_err(reject(instance))?;
        self.limits
            .validate_length("fields", params.fields.as_deref())
            .map_err(reject(instance))?;
        let selection = FieldSelection::parse(params.fields.as_deref());
        selection.validate_for::<R>().map_err(reject(instance))?;
        Ok((params.fields, selection))
    }

    /// Every field of `resource` plus its links.
    fn linked<R: LinkedResource>(&self, resource: &R) -> serde_json::Value {
        shape(resource, &FieldSelection::all())
            .with_links(&self.links.resource_links(resource, None))
            .into_value()
    }

    fn page_metadata<R: LinkedResource>(
        &self,
        segments: &[String],
        list: &ListQuery<R>,
        page: &PagedResult<R>,
    ) -> ft_projection::PaginationMetadata {
        let state = list.state();
        let previous = page
            .has_previous()
            .then(|| self.links.collection_uri(segments, &state, ResourceUriType::PreviousPage));
        let next = page
            .has_next()
            .then(|| self.links.collection_uri(segments, &state, ResourceUriType::NextPage));
        page.metadata().with_page_links(previous, next)
    }

    /// `{ value, links }` envelope plus `X-Pagination`.
    fn collection_response<R: LinkedResource>(
        &self,
        segments: &[String],
        list: &ListQuery<R>,
        page: &PagedResult<R>,
        instance: &str,
    ) -> ApiResult {
        let value: Vec<ShapedResource> = list.shape_page_with_links(page, &self.links);
        let links = self.links.collection_links(segments, &list.state(), page);
        let metadata = self.page_metadata(segments, list, page);
        with_pagination(
            ok_json(json!({ "value": value, "links": links })),
            &metadata,
            instance,
        )
    }
}
