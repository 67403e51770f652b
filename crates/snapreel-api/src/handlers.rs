//! Request handlers.

pub mod health;
pub mod planner;
pub mod publish;
pub mod scripts;
pub mod videos;

pub use health::*;
pub use planner::*;
pub use publish::*;
pub use scripts::*;
pub use videos::*;
