//! Typed mirror of the Trakt API JSON schema.
//!
//! Every field is optional on the wire: the API freely omits fields, so all
//! structs default missing numerics to zero, strings to empty, and booleans
//! to false. Entities are plain value objects created by deserializing a
//! response; they carry no lifecycle of their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A numeric field that the API sometimes serializes as an empty string
/// instead of omitting it (seen on top-watcher age and join date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeNum {
    /// The field was present as a number
    Num(i64),
    /// The field was absent, transmitted as a string (usually empty)
    Empty(String),
}

impl Default for MaybeNum {
    fn default() -> Self {
        MaybeNum::Empty(String::new())
    }
}

impl MaybeNum {
    /// Returns the numeric value, or None if the API sent a string.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MaybeNum::Num(n) => Some(*n),
            MaybeNum::Empty(_) => None,
        }
    }
}

/// A show as returned by search and summary queries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Show {
    pub title: String,
    pub year: i32,
    pub url: String,
    /// First air date as a unix epoch
    pub first_aired: i64,
    pub country: String,
    pub overview: String,
    /// Episode runtime in minutes
    pub runtime: i32,
    pub network: String,
    pub air_day: String,
    pub air_time: String,
    pub certification: String,
    pub imdb_id: String,
    pub tvdb_id: i64,
    pub tvrage_id: i64,
    pub ended: bool,
    /// Image kind ("poster", "fanart", ...) to URL
    pub images: HashMap<String, String>,
    pub genres: Vec<String>,
    /// Present on extended summaries and on searches with seasons=true
    pub seasons: Vec<Season>,
}

/// A container for one season's worth of episodes.
///
/// Episodes keep the API response order, which is not necessarily sorted by
/// episode number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub season: u32,
    pub url: String,
    pub poster: String,
    pub episodes: Vec<Episode>,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    pub number: u32,
    pub tvdb_id: i64,
    pub title: String,
    pub overview: String,
    /// The API returns the air date three ways; none is authoritative.
    pub first_aired: i64,
    pub first_aired_iso: String,
    pub first_aired_utc: i64,
    pub url: String,
    pub screen: String,
    pub images: HashMap<String, String>,
    pub ratings: Ratings,
    // Never filled out, the client does not authenticate with the API.
    pub watched: bool,
    pub in_collection: bool,
    pub in_watchlist: bool,
    pub rating: bool,
    pub rating_advanced: i32,
}

/// How Trakt users rated a show, episode or movie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratings {
    pub percentage: i32,
    pub votes: i32,
    pub loved: i32,
    pub hated: i32,
}

/// A movie as returned by search and summary queries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    /// Release date as a unix epoch
    pub released: i64,
    pub url: String,
    pub trailer: String,
    pub runtime: i32,
    pub tagline: String,
    pub overview: String,
    pub certification: String,
    pub imdb_id: String,
    pub tmdb_id: i64,
    pub rt_id: i64,
    pub last_updated: i64,
    pub images: MovieImages,
    pub genres: Vec<String>,
    pub top_watchers: Vec<TopWatcher>,
    pub ratings: Ratings,
    pub stats: Stats,
    pub people: People,
    // User-specific fields, never filled out without authentication.
    pub watched: bool,
    pub plays: i32,
    pub rating: String,
    pub rating_advanced: i32,
    pub in_watchlist: bool,
    pub in_collection: bool,
}

/// Poster and fanart URLs for a movie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieImages {
    pub poster: String,
    pub fanart: String,
}

/// A user profile from a movie's top-watchers list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopWatcher {
    pub plays: MaybeNum,
    pub username: String,
    pub protected: bool,
    pub full_name: String,
    pub gender: String,
    pub age: MaybeNum,
    pub location: String,
    pub about: String,
    pub joined: MaybeNum,
    pub avatar: String,
    pub url: String,
}

/// Aggregate viewing statistics for a movie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub watchers: i32,
    pub plays: i32,
    pub scrobbles: i32,
    pub checkins: i32,
    pub collection: i32,
}

/// Cast and crew for a movie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct People {
    pub directors: Vec<Director>,
    pub writers: Vec<Writer>,
    pub producers: Vec<Producer>,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Director {
    pub name: String,
    pub images: Headshot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Writer {
    pub name: String,
    pub job: String,
    pub images: Headshot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Producer {
    pub name: String,
    pub executive: bool,
    pub images: Headshot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    pub name: String,
    pub character: String,
    pub images: Headshot,
}

/// Headshot URL wrapper used by all people entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Headshot {
    pub headshot: String,
}
