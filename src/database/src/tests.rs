use crate::{
    ClubFields, EventFields, FixtureFields, LineupFields, NewProfileDates, NewSboEvent, NewUser,
    SeriesFields, Storage, TeamFields,
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc, Weekday};
use sportdesk_core::{FixtureStatus, RsvpStatus, SboEventType, UserRole, short_id, validate_roster};

async fn storage() -> Storage {
    let storage = Storage::connect("sqlite::memory:").await.unwrap();
    storage.migrate().await.unwrap();
    storage.seed().await.unwrap();
    storage
}

fn new_user(username: &str, role: UserRole) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.org", username),
        password_hash: "$argon2id$stub".to_string(),
        role,
        short_id: short_id(),
    }
}

fn no_dates() -> NewProfileDates {
    NewProfileDates {
        issue_date: None,
        expires_at: None,
    }
}

async fn make_club(storage: &Storage, name: &str) -> sportdesk_core::Club {
    storage
        .create_club(ClubFields {
            name: name.to_string(),
            federation_id: None,
            sport_id: None,
            address: "Main Street 1".to_string(),
            contact_email: None,
            phone: String::new(),
            website: None,
            additional_info: None,
        })
        .await
        .unwrap()
}

async fn make_team(storage: &Storage, club_id: u32, name: &str) -> sportdesk_core::Team {
    storage
        .create_team(TeamFields {
            name: name.to_string(),
            club_id,
            age_group_id: None,
            sport_id: None,
            player_ids: Vec::new(),
            trainer_ids: Vec::new(),
            cashier_id: None,
            short_code: None,
            additional_info: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let storage = storage().await;
    let report = storage.seed().await.unwrap();
    assert_eq!(report.sports, 0);
    assert_eq!(report.age_groups, 0);

    let sports = storage.sports().await.unwrap();
    assert!(sports.iter().any(|s| s.slug == "handball"));
    assert!(!storage.age_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let storage = storage().await;
    storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();

    let err = storage
        .create_user(new_user("anna", UserRole::Coach))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_unique_violation());
}

#[tokio::test]
async fn test_player_profile_is_one_to_one() {
    let storage = storage().await;
    let user = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();

    storage
        .create_player_profile(user.id, "PASS-1", no_dates(), None)
        .await
        .unwrap();

    let err = storage
        .create_player_profile(user.id, "PASS-2", no_dates(), None)
        .await
        .unwrap_err();
    assert!(err.as_database_error().unwrap().is_unique_violation());

    let loaded = storage.player_profile_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(loaded.pass_number, "PASS-1");
}

#[tokio::test]
async fn test_team_roster_round_trip() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV Musterstadt").await;
    let player = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();
    let trainer = storage
        .create_user(new_user("carl", UserRole::Coach))
        .await
        .unwrap();

    let team = storage
        .create_team(TeamFields {
            name: "First Team".to_string(),
            club_id: club.id,
            age_group_id: None,
            sport_id: None,
            player_ids: vec![player.id],
            trainer_ids: vec![trainer.id],
            cashier_id: Some(player.id),
            short_code: None,
            additional_info: None,
        })
        .await
        .unwrap();

    assert_eq!(team.slug, "first-team");
    let loaded = storage.team_by_slug("first-team").await.unwrap().unwrap();
    assert_eq!(loaded.player_ids, vec![player.id]);
    assert_eq!(loaded.trainer_ids, vec![trainer.id]);
    assert_eq!(loaded.cashier_id, Some(player.id));
}

#[tokio::test]
async fn test_roster_members_reflect_role_and_pass() {
    let storage = storage().await;
    let with_pass = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();
    let without_pass = storage
        .create_user(new_user("ben", UserRole::Player))
        .await
        .unwrap();
    let coach = storage
        .create_user(new_user("carl", UserRole::Coach))
        .await
        .unwrap();
    storage
        .create_player_profile(with_pass.id, "PASS-1", no_dates(), None)
        .await
        .unwrap();

    let members = storage
        .roster_members(&[with_pass.id, without_pass.id, coach.id])
        .await
        .unwrap();

    let anna = members.iter().find(|m| m.username == "anna").unwrap();
    assert!(anna.has_player_pass);
    assert!(validate_roster(std::slice::from_ref(anna)).is_ok());

    let ben = members.iter().find(|m| m.username == "ben").unwrap();
    assert!(!ben.has_player_pass);
    assert!(validate_roster(std::slice::from_ref(ben)).is_err());

    let carl = members.iter().find(|m| m.username == "carl").unwrap();
    assert_eq!(carl.role, UserRole::Coach);
}

#[tokio::test]
async fn test_series_generation_is_idempotent() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let team = make_team(&storage, club.id, "Youth").await;
    let trainer = storage
        .create_user(new_user("carl", UserRole::Coach))
        .await
        .unwrap();

    let series = storage
        .create_training_series(
            team.id,
            trainer.id,
            SeriesFields {
                weekday: Weekday::Mon,
                time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
                start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            },
        )
        .await
        .unwrap();

    let created = storage.generate_series_events(&series).await.unwrap();
    assert_eq!(created, 5);

    // re-run creates nothing new
    let created_again = storage.generate_series_events(&series).await.unwrap();
    assert_eq!(created_again, 0);

    let events = storage.trainings_for_team(team.id).await.unwrap();
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.series_id == Some(series.id)));
}

#[tokio::test]
async fn test_rsvp_upsert_replaces_previous_answer() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let team = make_team(&storage, club.id, "Youth").await;
    let player = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();
    let event = storage
        .create_training_event(
            team.id,
            player.id,
            EventFields {
                start: NaiveDate::from_ymd_opt(2026, 8, 10)
                    .unwrap()
                    .and_hms_opt(19, 0, 0)
                    .unwrap(),
                location: "Hall 2".to_string(),
                note: String::new(),
            },
        )
        .await
        .unwrap();

    storage
        .upsert_rsvp(event.id, player.id, RsvpStatus::No, Some("on shift".to_string()))
        .await
        .unwrap();
    let updated = storage
        .upsert_rsvp(event.id, player.id, RsvpStatus::Yes, None)
        .await
        .unwrap();

    assert_eq!(updated.status, RsvpStatus::Yes);
    assert_eq!(updated.comment, None);

    let map = storage.user_rsvps_for_team(team.id, player.id).await.unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map[&event.id].status, RsvpStatus::Yes);
}

#[tokio::test]
async fn test_penalty_ledger_flow() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let team = make_team(&storage, club.id, "Youth").await;
    let cashier = storage
        .create_user(new_user("kay", UserRole::Player))
        .await
        .unwrap();
    let player = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();

    let penalty = storage
        .create_penalty(team.id, "Late to practice", 250, "5 minutes grace")
        .await
        .unwrap();

    let assigned = storage
        .assign_penalty(team.id, player.id, penalty.id, "again", cashier.id)
        .await
        .unwrap();
    assert!(!assigned.paid);

    let paid = storage
        .mark_assigned_penalty_paid(team.id, assigned.id)
        .await
        .unwrap()
        .unwrap();
    assert!(paid.paid);

    // marking again stays paid
    let still_paid = storage
        .mark_assigned_penalty_paid(team.id, assigned.id)
        .await
        .unwrap()
        .unwrap();
    assert!(still_paid.paid);

    // team scoping: unknown team sees nothing
    assert!(
        storage
            .assigned_penalty_by_id(team.id + 1, assigned.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_chat_pagination_newest_first() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let team = make_team(&storage, club.id, "Youth").await;
    let user = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();

    for i in 0..35 {
        storage
            .add_chat_message(team.id, user.id, &format!("message {}", i))
            .await
            .unwrap();
    }

    let first_page = storage.chat_messages_page(team.id, 1).await.unwrap();
    assert_eq!(first_page.len(), 30);
    assert_eq!(first_page[0].text, "message 34");

    let second_page = storage.chat_messages_page(team.id, 2).await.unwrap();
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[4].text, "message 0");

    assert_eq!(storage.chat_message_count(team.id).await.unwrap(), 35);
}

#[tokio::test]
async fn test_sbo_game_per_fixture_and_goal_log() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let home = make_team(&storage, club.id, "First").await;
    let away = make_team(&storage, club.id, "Second").await;

    let fixture = storage
        .create_fixture(
            &home.name,
            &away.name,
            FixtureFields {
                home_team_id: home.id,
                away_team_id: away.id,
                venue_id: None,
                kickoff: Utc::now() + Duration::days(1),
                competition: "League".to_string(),
                round: "1".to_string(),
                referee_id: None,
                status: FixtureStatus::Scheduled,
                result_home: None,
                result_away: None,
                additional_info: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(fixture.slug.matches("vs").count(), 1);

    let game = storage
        .create_sbo_game(fixture.id, "first-second-live", "AB12CD")
        .await
        .unwrap();

    let err = storage
        .create_sbo_game(fixture.id, "other-slug", "ZZ99XX")
        .await
        .unwrap_err();
    assert!(err.as_database_error().unwrap().is_unique_violation());

    let mut live = game.clone();
    live.apply_goal(&fixture, home.id);
    live.start(Utc::now());
    storage.save_sbo_game(&live).await.unwrap();
    storage
        .add_sbo_event(
            game.id,
            NewSboEvent {
                event_type: SboEventType::Goal,
                team_id: Some(home.id),
                player_id: None,
                meta: serde_json::json!({ "minute": 12 }),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    let reloaded = storage.sbo_game_by_fixture(fixture.id).await.unwrap().unwrap();
    assert_eq!(reloaded.score_home, 1);
    assert!(reloaded.is_running);

    let events = storage.sbo_events_for_game(game.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, SboEventType::Goal);
    assert_eq!(events[0].meta["minute"], 12);
}

#[tokio::test]
async fn test_search_matches_team_and_club_fields() {
    let storage = storage().await;
    let club = make_club(&storage, "HSG Nordheide").await;
    let sports = storage.sports().await.unwrap();
    let handball = sports.iter().find(|s| s.slug == "handball").unwrap();

    storage
        .create_team(TeamFields {
            name: "Wildcats".to_string(),
            club_id: club.id,
            age_group_id: None,
            sport_id: Some(handball.id),
            player_ids: Vec::new(),
            trainer_ids: Vec::new(),
            cashier_id: None,
            short_code: None,
            additional_info: None,
        })
        .await
        .unwrap();

    // by team name, case-insensitive
    assert_eq!(storage.search_teams("wildcat").await.unwrap().len(), 1);
    // by club name
    assert_eq!(storage.search_teams("nordheide").await.unwrap().len(), 1);
    // by sport name
    assert_eq!(storage.search_teams("handball").await.unwrap().len(), 1);
    // clubs by address
    assert_eq!(storage.search_clubs("main street").await.unwrap().len(), 1);
    // no match
    assert!(storage.search_teams("curling").await.unwrap().is_empty());

    assert_eq!(
        storage.sport_names_in_use().await.unwrap(),
        vec!["Handball".to_string()]
    );
}

#[tokio::test]
async fn test_sessions_expire() {
    let storage = storage().await;
    let user = storage
        .create_user(new_user("anna", UserRole::Player))
        .await
        .unwrap();
    let now = Utc::now();

    storage
        .create_session(user.id, "live-token", now + Duration::hours(24))
        .await
        .unwrap();
    storage
        .create_session(user.id, "dead-token", now - Duration::hours(1))
        .await
        .unwrap();

    assert!(
        storage
            .session_user("live-token", now)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        storage
            .session_user("dead-token", now)
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(storage.delete_expired_sessions(now).await.unwrap(), 1);
    storage.delete_session("live-token").await.unwrap();
    assert!(
        storage
            .session_user("live-token", now)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_slug_conflicts_surface_as_unique_violation() {
    let storage = storage().await;
    make_club(&storage, "TSV Musterstadt").await;

    let err = storage
        .create_club(ClubFields {
            name: "TSV Musterstadt".to_string(),
            federation_id: None,
            sport_id: None,
            address: String::new(),
            contact_email: None,
            phone: String::new(),
            website: None,
            additional_info: None,
        })
        .await
        .unwrap_err();
    assert!(err.as_database_error().unwrap().is_unique_violation());
}

#[tokio::test]
async fn test_federation_hierarchy_walk() {
    let storage = storage().await;

    let root = storage
        .create_federation(crate::FederationFields {
            name: "National Federation".to_string(),
            parent_id: None,
            head_federation_id: None,
            sport_id: None,
            country: "DE".to_string(),
            contact_email: None,
            address: None,
            phone_number: None,
            website: None,
            additional_info: None,
        })
        .await
        .unwrap();
    let regional = storage
        .create_federation(crate::FederationFields {
            name: "Regional Federation".to_string(),
            parent_id: Some(root.id),
            head_federation_id: None,
            sport_id: None,
            country: "DE".to_string(),
            contact_email: None,
            address: None,
            phone_number: None,
            website: None,
            additional_info: None,
        })
        .await
        .unwrap();

    let chain = storage.federation_hierarchy(regional.id).await.unwrap();
    let names: Vec<&str> = chain.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["National Federation", "Regional Federation"]);
}

#[tokio::test]
async fn test_lineups_scoped_and_public_filtered() {
    let storage = storage().await;
    let club = make_club(&storage, "TSV").await;
    let team = make_team(&storage, club.id, "Youth").await;
    let trainer = storage
        .create_user(new_user("carl", UserRole::Coach))
        .await
        .unwrap();
    let now = Utc::now();

    storage
        .create_lineup(
            team.id,
            trainer.id,
            LineupFields {
                name: "Public plan".to_string(),
                date: Some(now + Duration::days(2)),
                player_ids: Vec::new(),
                is_public: true,
            },
        )
        .await
        .unwrap();
    storage
        .create_lineup(
            team.id,
            trainer.id,
            LineupFields {
                name: "Internal plan".to_string(),
                date: Some(now + Duration::days(3)),
                player_ids: Vec::new(),
                is_public: false,
            },
        )
        .await
        .unwrap();

    let public = storage
        .public_upcoming_lineups(team.id, now, 6)
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].name, "Public plan");

    assert_eq!(storage.lineups_for_team(team.id).await.unwrap().len(), 2);
}
