//! Location resolution for extracted events.
//!
//! This crate provides:
//! - [`normalize`]: shorthand table for campus building names
//! - [`similarity`]: character-level sequence similarity ratio
//! - [`matcher`]: best catalog building plus confidence tier
//! - [`assign`]: random fallback, room choice, link slots
//! - [`resolver`]: [`Resolver`], which turns drafts into resolved events
//!
//! Randomness is always passed in, so callers can seed it.

pub mod assign;
pub mod matcher;
pub mod normalize;
pub mod resolver;
pub mod similarity;

pub use assign::{
    CUSTOM_LINK_LABEL, LinkSlots, PLACEHOLDER_ROOMS, choose_room, classify_links, random_building,
};
pub use matcher::{
    CONTAINMENT_SCORE, HIGH_CONFIDENCE, MIN_CONFIDENCE, MatchResult, MatchTier, match_building,
};
pub use normalize::{REPLACEMENTS, normalize_building_name};
pub use resolver::{Resolution, Resolver, SkipReason};
pub use similarity::similarity_ratio;
