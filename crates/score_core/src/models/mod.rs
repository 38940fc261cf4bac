pub mod frame;
pub mod match_input;
pub mod match_result;

pub use frame::{Frame, FrameSide};
pub use match_input::{MatchInput, Side, TeamInput};
pub use match_result::{MatchResult, ResultTeam};
