//! Script template engine and hashtag lookup.
//!
//! Both halves are stateless: the engine fills fixed sentence templates with
//! caller-supplied phrases, the lookup matches a niche against a fixed
//! dictionary. No network, no storage.

pub mod engine;
pub mod hashtags;

pub use engine::{generate_script, generate_script_with};
pub use hashtags::{lookup_hashtags, MAX_HASHTAGS};
