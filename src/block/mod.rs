//! LZ4 block compression: match model, chain store, match finder, backwards
//! cost optimizer, and the token serializer.
//!
//! The pipeline over one block is strictly sequential:
//! [`finder::link_position`] maintains the chain store position by position,
//! [`finder::find_longest_match`] fills a per-position candidate vector,
//! [`optimal::estimate_costs`] rewrites that vector into the cheapest parse,
//! and [`encode::serialize_matches`] turns the parse into block bytes.

pub mod chain;
pub mod encode;
pub mod finder;
pub mod optimal;
pub mod types;

pub use chain::ChainStore;
pub use encode::serialize_matches;
pub use finder::{find_longest_match, link_position};
pub use optimal::estimate_costs;
pub use types::Match;
