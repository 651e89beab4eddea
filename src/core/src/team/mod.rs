pub mod age_group;
pub mod chat;
pub mod lineup;
pub mod penalty;
pub mod permissions;
pub mod roster;
pub mod team;
pub mod training;

pub use age_group::*;
pub use chat::*;
pub use lineup::*;
pub use penalty::*;
pub use permissions::*;
pub use roster::*;
pub use team::*;
pub use training::*;
