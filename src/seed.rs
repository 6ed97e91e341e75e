//! Demo data for local runs.
//!
//! Enabled with `SEED_DEMO_DATA=true`. Everything goes through the service
//! layer, so seeded records obey the same validation and publish the same
//! notices as records created over HTTP.

use chrono::{Duration, Utc};

use crate::app_state::AppState;
use crate::domain::{
    EventStatus, MatchStatus, NewEvent, NewMatch, Role, Scoreline, SportType, User,
};
use crate::error::KeeperError;

/// Email of the seeded administrator.
pub const DEMO_ADMIN_EMAIL: &str = "admin@matchkeeper.dev";
/// Password of every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

/// Match title, both teams, start offset from now and the status moves
/// applied after creation.
type Fixture = (&'static str, &'static str, &'static str, Duration, &'static [MatchStatus]);

/// What [`seed_demo_data`] created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Accounts created.
    pub users: usize,
    /// Events created.
    pub events: usize,
    /// Matches created.
    pub matches: usize,
}

/// Fills empty stores with an admin, a host, a player, three events and a
/// handful of matches in every status.
///
/// # Errors
///
/// Returns the first service error, e.g. [`KeeperError::EmailTaken`] if
/// the demo accounts already exist.
pub async fn seed_demo_data(state: &AppState) -> Result<SeedSummary, KeeperError> {
    let mut summary = SeedSummary::default();

    let admin = state
        .identity
        .provision(User::new("Alex Admin", DEMO_ADMIN_EMAIL, Role::Admin), DEMO_PASSWORD)
        .await?;
    for (name, email, role) in [
        ("Harper Host", "host@matchkeeper.dev", Role::Host),
        ("Parker Player", "player@matchkeeper.dev", Role::Player),
    ] {
        state
            .identity
            .provision(User::new(name, email, role), DEMO_PASSWORD)
            .await?;
        summary.users += 1;
    }
    summary.users += 1;

    let now = Utc::now();
    let events = [
        (
            "City Basketball Championship",
            "Eight teams, single elimination.",
            now + Duration::days(14),
            "Downtown Arena",
            EventStatus::Upcoming,
            SportType::Basketball,
        ),
        (
            "Summer Tennis Open",
            "Singles and doubles across three courts.",
            now,
            "Riverside Courts",
            EventStatus::Ongoing,
            SportType::Tennis,
        ),
        (
            "Spring Volleyball League",
            "Round robin, best of five sets.",
            now - Duration::days(30),
            "Beachfront Park",
            EventStatus::Completed,
            SportType::Volleyball,
        ),
    ];

    let mut event_ids = Vec::with_capacity(events.len());
    for (title, description, date, venue, status, sport) in events {
        let event = state
            .events
            .create_event(
                Some(&admin),
                NewEvent {
                    title: title.to_string(),
                    description: description.to_string(),
                    date,
                    venue: venue.to_string(),
                    status: Some(status),
                    sport: Some(sport),
                },
            )
            .await?;
        event_ids.push(event.id);
        summary.events += 1;
    }

    const PLAYED: &[MatchStatus] = &[MatchStatus::Ongoing, MatchStatus::Completed];
    let fixtures: [[Fixture; 2]; 3] = [
        [
            ("Quarterfinal 1", "Hawks", "Bulls", Duration::days(14), &[]),
            ("Quarterfinal 2", "Lakers", "Suns", Duration::days(14) + Duration::hours(2), &[]),
        ],
        [
            (
                "Men's Singles Final",
                "Rivera",
                "Okafor",
                Duration::hours(-1),
                &[MatchStatus::Ongoing],
            ),
            ("Women's Doubles Semi", "Chen / Ito", "Silva / Novak", Duration::hours(-4), PLAYED),
        ],
        [
            ("Final", "Spikers", "Blockers", Duration::days(-30), PLAYED),
            ("Third Place", "Diggers", "Setters", Duration::days(-30), &[MatchStatus::Cancelled]),
        ],
    ];

    for (&event_id, games) in event_ids.iter().zip(fixtures) {
        for (title, team_a, team_b, offset, steps) in games {
            let game = state
                .matches
                .create_match(
                    Some(&admin),
                    event_id,
                    NewMatch {
                        title: title.to_string(),
                        team_a: team_a.to_string(),
                        team_b: team_b.to_string(),
                        start_time: now + offset,
                        status: None,
                        notes: None,
                        sport: None,
                    },
                )
                .await?;
            summary.matches += 1;

            for &next in steps {
                let scores = if next == MatchStatus::Completed {
                    Scoreline {
                        score_a: Some(3),
                        score_b: Some(1),
                    }
                } else {
                    Scoreline::default()
                };
                state
                    .matches
                    .update_match_status(Some(&admin), game.id, next, scores)
                    .await?;
            }
        }
    }

    tracing::info!(
        users = summary.users,
        events = summary.events,
        matches = summary.matches,
        admin = DEMO_ADMIN_EMAIL,
        "demo data seeded"
    );
    Ok(summary)
}
