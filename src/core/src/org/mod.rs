pub mod club;
pub mod federation;

pub use club::*;
pub use federation::*;
