pub mod history;
pub mod market;
pub mod portfolio;

pub use history::*;
pub use market::*;
pub use portfolio::*;
