pub mod cli;
pub mod score;
pub mod util;
