pub mod movegen;
pub mod moves;
pub mod state;
pub mod types;

pub use moves::{Direction, Move};
pub use state::{BoardState, GoalRule, Rules, TerminalStatus};
pub use types::{Dimensions, Side, Square, MAX_SIDE};
