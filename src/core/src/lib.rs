pub mod accounts;
pub mod fixture;
pub mod news;
pub mod org;
pub mod sbo;
pub mod shared;
pub mod team;
pub mod venue;

// Re-export accounts items
pub use accounts::{PlayerProfile, RefereeProfile, Sport, TimekeeperProfile, User, UserRole};

// Re-export organization items
pub use org::{Club, Federation, HeadFederation, OrgNode, hierarchy};

// Re-export team items
pub use team::{
    AgeGroup, AssignedPenalty, ChatMessage, Lineup, Penalty, RosterError, RosterMember,
    RsvpStatus, Team, TrainingEvent, TrainingRsvp, TrainingSeries, expansion_dates, is_cashier,
    is_member, is_player, is_trainer, rsvp_comment, validate_roster,
};

// Re-export fixture / venue / sbo items
pub use fixture::{Fixture, FixtureStatus};
pub use sbo::{SboEvent, SboEventType, SboGame, can_operate_game};
pub use venue::Venue;

pub use news::NewsItem;

pub use shared::{format_amount, short_code, short_id, slugify};
