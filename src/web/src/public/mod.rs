pub mod routes;

use crate::auth::MaybeAuthUser;
use crate::{ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use sportdesk_core::{Club, Team};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const LATEST_TEAMS: u32 = 12;

#[derive(Serialize)]
pub struct TeamCard {
    pub name: String,
    pub slug: String,
    pub club: String,
    pub sport: Option<String>,
    pub age_group: Option<String>,
}

#[derive(Serialize)]
pub struct ClubCard {
    pub name: String,
    pub slug: String,
    pub address: String,
}

fn club_card(club: &Club) -> ClubCard {
    ClubCard {
        name: club.name.clone(),
        slug: club.slug.clone(),
        address: club.address.clone(),
    }
}

/// Resolves club/sport/age-group names for a list of teams with three
/// lookups instead of one per team.
async fn team_cards(state: &AppData, teams: &[Team]) -> ApiResult<Vec<TeamCard>> {
    let clubs: HashMap<u32, String> = state
        .storage
        .clubs()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let sports: HashMap<u32, String> = state
        .storage
        .sports()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let age_groups: HashMap<u32, String> = state
        .storage
        .age_groups()
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    Ok(teams
        .iter()
        .map(|team| TeamCard {
            name: team.name.clone(),
            slug: team.slug.clone(),
            club: clubs.get(&team.club_id).cloned().unwrap_or_default(),
            sport: team.sport_id.and_then(|id| sports.get(&id).cloned()),
            age_group: team.age_group_id.and_then(|id| age_groups.get(&id).cloned()),
        })
        .collect())
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub sports: Vec<String>,
    pub latest_teams: Vec<TeamCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_teams: Option<Vec<TeamCard>>,
}

/// Public landing page: sports in use, latest teams, and the caller's
/// own teams when logged in.
pub async fn home_action(
    State(state): State<AppData>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> ApiResult<impl IntoResponse> {
    let sports = state.storage.sport_names_in_use().await?;
    let latest = state.storage.latest_teams(LATEST_TEAMS).await?;

    let my_teams = match &user {
        Some(user) => {
            let teams = state.storage.teams_for_player(user.id).await?;
            Some(team_cards(&state, &teams).await?)
        }
        None => None,
    };

    Ok(Json(HomeResponse {
        sports,
        latest_teams: team_cards(&state, &latest).await?,
        my_teams,
    }))
}

#[derive(Serialize)]
pub struct SportOverviewResponse {
    pub sport: String,
    /// Club name -> that club's teams, club-sorted.
    pub clubs: Vec<SportOverviewClub>,
}

#[derive(Serialize)]
pub struct SportOverviewClub {
    pub club: String,
    pub teams: Vec<TeamCard>,
}

/// All teams of one sport, grouped by club.
pub async fn sport_overview_action(
    State(state): State<AppData>,
    Path(sport_name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let teams = state.storage.teams_by_sport_name(&sport_name).await?;
    let cards = team_cards(&state, &teams).await?;

    // the store orders by club name, so grouping adjacent cards is enough
    let grouped = cards.into_iter().chunk_by(|card| card.club.clone());
    let mut clubs = Vec::new();
    for (club, group) in &grouped {
        clubs.push(SportOverviewClub {
            club,
            teams: group.collect(),
        });
    }

    Ok(Json(SportOverviewResponse {
        sport: sport_name,
        clubs,
    }))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub teams: Vec<TeamCard>,
    pub clubs: Vec<ClubCard>,
}

/// Universal search over teams and clubs. An empty query returns empty
/// result lists rather than everything.
pub async fn search_action(
    State(state): State<AppData>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let needle = query.q.trim().to_string();

    let (teams, clubs) = if needle.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        (
            state.storage.search_teams(&needle).await?,
            state.storage.search_clubs(&needle).await?,
        )
    };

    Ok(Json(SearchResponse {
        query: needle,
        teams: team_cards(&state, &teams).await?,
        clubs: clubs.iter().map(club_card).collect(),
    }))
}
