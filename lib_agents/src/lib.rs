mod console;
mod greedy_agent;
mod human_agent;
mod narrated_agent;
mod random_agent;
mod util;

pub use console::{clear_screen, render_state};
pub use greedy_agent::GreedyAgent;
pub use human_agent::HumanAgent;
pub use narrated_agent::NarratedAgent;
pub use random_agent::RandomAgent;
