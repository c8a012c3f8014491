#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the tournament REST boundary over the in-memory store

use std::sync::Arc;

use http::StatusCode;
use http::header::{ALLOW, CONTENT_TYPE, LOCATION};
use serde_json::{Value, json};
use tournament::api::rest::dto::{CreateGroupReq, CreateTeamReq, PatchTeamReq, UpdateTeamReq};
use tournament::api::rest::response::{HATEOAS_MEDIA_TYPE, X_PAGINATION, into_response};
use tournament::domain::model::{Group, Team};
use tournament::infra::memory::{InMemoryTournament, seed};
use tournament::{Service, TournamentApi, TournamentConfig};
use tracing_test::traced_test;
use uuid::Uuid;

const BASE: &str = "http://localhost:8087/api/v1";

fn api_over(store: InMemoryTournament) -> (TournamentApi, Arc<InMemoryTournament>) {
    let store = Arc::new(store);
    let svc = Arc::new(Service::new(store.clone(), store.clone()));
    let api = TournamentApi::from_config(svc, &TournamentConfig::default()).unwrap();
    (api, store)
}

fn seeded() -> TournamentApi {
    api_over(InMemoryTournament::seeded()).0
}

/// `Team1`..`Team10`, wins cycling 0..=3, draw 1, all in group A.
fn ten_teams() -> Vec<Team> {
    (1..=10)
        .map(|i: i32| Team {
            id: Uuid::new_v4(),
            name: format!("Team{i}"),
            description: format!("Description{i}"),
            points_scored: 10 - i,
            win: i % 4,
            draw: 1,
            lost: 0,
            group_id: Some(seed::GROUP_A),
        })
        .collect()
}

fn pagination(resp: &http::Response<Value>) -> Value {
    let raw = resp.headers().get(&X_PAGINATION).unwrap().to_str().unwrap();
    serde_json::from_str(raw).unwrap()
}

fn rels(links: &Value) -> Vec<&str> {
    links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Teams collection
// =============================================================================

#[tokio::test]
async fn test_first_page_sorted_with_next_link() {
    let (api, _) = api_over(InMemoryTournament::new(ten_teams(), seed::groups()));

    let resp = api
        .get_teams("orderBy=win%20desc,%20name&pageSize=8&pageNumber=1")
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.body();
    let value = body["value"].as_array().unwrap();
    assert_eq!(value.len(), 8);
    let names: Vec<&str> = value.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        ["Team3", "Team7", "Team10", "Team2", "Team6", "Team1", "Team5", "Team9"]
    );

    assert_eq!(rels(&body["links"]), ["self", "next-page"]);
    assert_eq!(
        body["links"][1]["href"],
        json!(format!(
            "{BASE}/teams?orderBy=win+desc%2C+name&pageNumber=2&pageSize=8"
        ))
    );

    let meta = pagination(&resp);
    assert_eq!(meta["totalCount"], json!(10));
    assert_eq!(meta["totalPages"], json!(2));
    assert_eq!(meta["currentPage"], json!(1));
    assert_eq!(meta["pageSize"], json!(8));
    assert!(meta.get("previousPageLink").is_none());
    assert_eq!(meta["nextPageLink"], body["links"][1]["href"]);
}

#[tokio::test]
async fn test_page_beyond_end_is_empty_with_previous_link() {
    let (api, _) = api_over(InMemoryTournament::new(ten_teams(), seed::groups()));

    let resp = api.get_teams("pageNumber=99").await.unwrap();
    let body = resp.body();
    assert!(body["value"].as_array().unwrap().is_empty());
    assert_eq!(rels(&body["links"]), ["self", "previous-page"]);
    assert!(
        body["links"][1]["href"]
            .as_str()
            .unwrap()
            .contains("pageNumber=98")
    );
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let (api, _) = api_over(InMemoryTournament::new(ten_teams(), seed::groups()));
    let resp = api.get_teams("pageSize=100").await.unwrap();
    assert_eq!(resp.body()["value"].as_array().unwrap().len(), 8);
    assert_eq!(pagination(&resp)["pageSize"], json!(8));
}

#[tokio::test]
async fn test_list_items_shaped_with_their_own_links() {
    let api = seeded();
    let resp = api.get_teams("fields=name").await.unwrap();
    let first = &resp.body()["value"][0];
    let keys: Vec<&String> = first.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["name", "links"]);
    assert_eq!(
        rels(&first["links"]),
        ["self", "delete_team", "create_team", "update_team"]
    );
    assert_eq!(
        first["links"][0]["href"],
        json!(format!("{BASE}/teams/{}", seed::TEAM_1))
    );
}

#[tokio::test]
#[traced_test]
async fn test_unknown_field_rejected_before_listing() {
    let api = seeded();
    let problem = api.get_teams("fields=bogus").await.unwrap_err();
    assert_eq!(problem.status, StatusCode::BAD_REQUEST);
    assert_eq!(problem.instance, "/teams");
    assert!(problem.detail.contains("bogus"));
    assert!(!logs_contain("Listed teams"));
    logs_assert(|lines: &[&str]| {
        match lines.iter().filter(|l| l.contains("Rejected")).count() {
            1 => Ok(()),
            n => Err(format!("expected one rejection warning, got {n}")),
        }
    });
}

#[tokio::test]
async fn test_unknown_sort_field_and_malformed_query() {
    let api = seeded();
    let problem = api.get_teams("orderBy=goals").await.unwrap_err();
    assert_eq!(problem.status, StatusCode::BAD_REQUEST);
    assert_eq!(problem.code, "ft.projection.invalid_orderby");

    let resp = into_response(api.get_teams("pageNumber=first").await);
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
}

// =============================================================================
// Single team
// =============================================================================

#[tokio::test]
async fn test_get_team_shapes_in_requested_order() {
    let (api, _) = api_over(InMemoryTournament::new(
        vec![Team {
            id: seed::TEAM_1,
            name: "Team1".to_owned(),
            description: "Description1".to_owned(),
            points_scored: 10,
            win: 3,
            draw: 1,
            lost: 0,
            group_id: None,
        }],
        seed::groups(),
    ));

    let resp = api.get_team(seed::TEAM_1, "fields=name,win").await.unwrap();
    let body = resp.body();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["name", "win", "links"]);
    assert_eq!(body["name"], json!("Team1"));
    assert_eq!(body["win"], json!(3));
    assert_eq!(
        body["links"][0]["href"],
        json!(format!("{BASE}/teams/{}?fields=name%2Cwin", seed::TEAM_1))
    );
    assert_eq!(
        body["links"][1]["href"],
        json!(format!("{BASE}/teams/{}", seed::TEAM_1))
    );
    assert_eq!(body["links"][2]["href"], json!(format!("{BASE}/teams")));
    assert_eq!(body["links"][3]["method"], json!("PUT"));
}

#[tokio::test]
async fn test_get_team_errors() {
    let api = seeded();
    let problem = api.get_team(Uuid::new_v4(), "").await.unwrap_err();
    assert_eq!(problem.status, StatusCode::NOT_FOUND);

    let problem = api.get_team(seed::TEAM_1, "fields=NAME,bogus").await.unwrap_err();
    assert_eq!(problem.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Team mutations
// =============================================================================

#[tokio::test]
#[traced_test]
async fn test_create_team_returns_location_and_links() {
    let (api, store) = api_over(InMemoryTournament::seeded());
    let resp = api
        .create_team(CreateTeamReq {
            name: "Team3".to_owned(),
            description: Some("Newcomers".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = resp.body();
    let id = body["id"].as_str().unwrap();
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        format!("{BASE}/teams/{id}").as_str()
    );
    assert_eq!(body["pointsScored"], json!(0));
    assert_eq!(body["groupId"], Value::Null);
    assert_eq!(rels(&body["links"]).len(), 4);
    assert_eq!(store.team_count(), 3);
    assert!(logs_contain("Created team"));
}

#[tokio::test]
async fn test_create_team_validation() {
    let api = seeded();
    let problem = api
        .create_team(CreateTeamReq {
            name: "Team1".to_owned(),
            description: None,
        })
        .await
        .unwrap_err();
    assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem.code, "ft.tournament.team_name_taken");

    let problem = api.create_team(CreateTeamReq::default()).await.unwrap_err();
    assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem.invalid_params.unwrap()[0].name, "name");
}

#[tokio::test]
async fn test_update_team() {
    let api = seeded();
    let update = UpdateTeamReq {
        points_scored: 7,
        win: 2,
        draw: 1,
        lost: 0,
        group_id: Some(seed::GROUP_A),
    };

    let resp = api.update_team(seed::TEAM_2, update).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let team = api.get_team(seed::TEAM_2, "fields=pointsScored,groupId").await.unwrap();
    assert_eq!(team.body()["pointsScored"], json!(7));
    assert_eq!(team.body()["groupId"], json!(seed::GROUP_A.to_string()));

    let missing_group = UpdateTeamReq {
        group_id: Some(Uuid::new_v4()),
        ..update
    };
    let problem = api.update_team(seed::TEAM_2, missing_group).await.unwrap_err();
    assert_eq!(problem.status, StatusCode::NOT_FOUND);
    assert_eq!(problem.code, "ft.tournament.group_not_found");

    let problem = api.update_team(Uuid::new_v4(), update).await.unwrap_err();
    assert_eq!(problem.code, "ft.tournament.team_not_found");
}

#[tokio::test]
async fn test_partially_update_and_delete_team() {
    let api = seeded();
    let resp = api
        .partially_update_team(
            seed::TEAM_2,
            PatchTeamReq {
                name: Some("Renamed".to_owned()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let team = api.get_team(seed::TEAM_2, "fields=name,description").await.unwrap();
    assert_eq!(
        team.body(),
        &json!({
            "name": "Renamed",
            "description": "Description2",
            "links": team.body()["links"].clone(),
        })
    );

    let problem = api
        .partially_update_team(
            seed::TEAM_2,
            PatchTeamReq {
                name: None,
                description: Some("x".repeat(501)),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(
        api.delete_team(seed::TEAM_2).await.unwrap().status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        api.delete_team(seed::TEAM_2).await.unwrap_err().status,
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_options_advertise_methods() {
    let resp = TournamentApi::teams_options();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(ALLOW).unwrap(),
        "GET,OPTIONS,POST,PUT,PATCH,DELETE"
    );
    assert_eq!(
        TournamentApi::groups_options().headers().get(ALLOW).unwrap(),
        "GET,OPTIONS,POST"
    );
}

// =============================================================================
// Groups
// =============================================================================

#[tokio::test]
async fn test_get_groups_validates_against_group_fields() {
    let api = seeded();
    let resp = api.get_groups("fields=name").await.unwrap();
    let value = resp.body()["value"].as_array().unwrap();
    assert_eq!(value.len(), 2);
    assert_eq!(value[0]["name"], json!("A"));
    assert_eq!(rels(&value[0]["links"]), ["self", "create_group"]);
    assert_eq!(rels(&resp.body()["links"]), ["self"]);
    assert_eq!(pagination(&resp)["totalCount"], json!(2));

    let problem = api.get_groups("fields=win").await.unwrap_err();
    assert_eq!(problem.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_groups_pages_carry_collection_links() {
    let groups: Vec<Group> = (1..=12)
        .map(|i| Group {
            id: Uuid::new_v4(),
            name: format!("G{i:02}"),
        })
        .collect();
    let (api, _) = api_over(InMemoryTournament::new(Vec::new(), groups));

    let resp = api.get_groups("pageNumber=1").await.unwrap();
    let body = resp.body();
    assert_eq!(body["value"].as_array().unwrap().len(), 8);
    assert_eq!(rels(&body["links"]), ["self", "next-page"]);
    assert_eq!(
        body["links"][0]["href"],
        json!(format!("{BASE}/groups?pageNumber=1&pageSize=8"))
    );
    assert_eq!(
        body["links"][1]["href"],
        json!(format!("{BASE}/groups?pageNumber=2&pageSize=8"))
    );
    assert_eq!(pagination(&resp)["nextPageLink"], body["links"][1]["href"]);

    let resp = api.get_groups("orderBy=name%20desc&pageNumber=2").await.unwrap();
    let body = resp.body();
    assert_eq!(body["value"].as_array().unwrap().len(), 4);
    assert_eq!(body["value"][0]["name"], json!("G04"));
    assert_eq!(rels(&body["links"]), ["self", "previous-page"]);
}

#[tokio::test]
async fn test_get_group_content_negotiation() {
    let api = seeded();

    let plain = api
        .get_group(seed::GROUP_B, "", Some("application/json"))
        .await
        .unwrap();
    assert_eq!(
        plain.body(),
        &json!({ "id": seed::GROUP_B.to_string(), "name": "B" })
    );

    let linked = api
        .get_group(seed::GROUP_B, "fields=name", Some(HATEOAS_MEDIA_TYPE))
        .await
        .unwrap();
    assert_eq!(
        linked.headers().get(CONTENT_TYPE).unwrap(),
        HATEOAS_MEDIA_TYPE
    );
    assert_eq!(linked.body()["name"], json!("B"));
    assert!(linked.body().get("id").is_none());
    assert_eq!(rels(&linked.body()["links"]), ["self", "create_group"]);

    let defaulted = api.get_group(seed::GROUP_A, "", None).await.unwrap();
    assert!(defaulted.body().get("links").is_none());

    let problem = api
        .get_group(seed::GROUP_A, "", Some("not a media type"))
        .await
        .unwrap_err();
    assert_eq!(problem.status, StatusCode::BAD_REQUEST);
    assert_eq!(problem.code, "ft.tournament.invalid_media_type");

    let problem = api
        .get_group(Uuid::new_v4(), "", Some("application/json"))
        .await
        .unwrap_err();
    assert_eq!(problem.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_teams_for_empty_group() {
    let api = seeded();
    let resp = api.get_teams_for_group(seed::GROUP_A, "").await.unwrap();
    let body = resp.body();
    assert!(body["value"].as_array().unwrap().is_empty());
    assert_eq!(rels(&body["links"]), ["self"]);
    assert_eq!(
        body["links"][0]["href"],
        json!(format!(
            "{BASE}/groups/{}/teams?pageNumber=1&pageSize=8",
            seed::GROUP_A
        ))
    );

    let meta = pagination(&resp);
    assert_eq!(meta["totalCount"], json!(0));
    assert_eq!(meta["totalPages"], json!(0));
    assert!(meta.get("nextPageLink").is_none());
}

#[tokio::test]
async fn test_teams_for_group_default_and_explicit_order() {
    let (api, _) = api_over(InMemoryTournament::new(ten_teams(), seed::groups()));

    // points_scored is 10 - i, so the store order is Team10 first
    let resp = api.get_teams_for_group(seed::GROUP_A, "fields=name").await.unwrap();
    assert_eq!(resp.body()["value"][0]["name"], json!("Team10"));
    assert_eq!(rels(&resp.body()["links"]), ["self", "next-page"]);

    let resp = api
        .get_teams_for_group(seed::GROUP_A, "fields=name&orderBy=name")
        .await
        .unwrap();
    assert_eq!(resp.body()["value"][0]["name"], json!("Team1"));

    let problem = api
        .get_teams_for_group(Uuid::new_v4(), "")
        .await
        .unwrap_err();
    assert_eq!(problem.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_group() {
    let (api, _) = api_over(InMemoryTournament::new(Vec::new(), Vec::<Group>::new()));
    let resp = api
        .create_group(CreateGroupReq {
            name: "C".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = resp.body()["id"].as_str().unwrap();
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        format!("{BASE}/groups/{id}").as_str()
    );

    let problem = api.create_group(CreateGroupReq::default()).await.unwrap_err();
    assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Root
// =============================================================================

#[test]
fn test_root_links_and_version() {
    let api = seeded();
    let resp = api.get_root();
    let body = resp.body();
    assert_eq!(rels(body), ["self", "teams", "create_team", "groups"]);
    assert_eq!(body[0]["href"], json!(BASE));
    assert_eq!(body[2]["method"], json!("POST"));

    assert_eq!(TournamentApi::api_version().body(), &json!("Version: 1.0"));
}
