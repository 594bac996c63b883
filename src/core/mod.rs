mod generator;
mod history;
mod session;
mod synthesizer;

pub use generator::*;
pub use history::*;
pub use session::*;
pub use synthesizer::*;
