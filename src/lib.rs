//! Client library for the Trakt.tv movie/TV metadata API.
//!
//! Search shows and movies, fetch extended summaries, and list episodes per
//! season. All operations are synchronous, blocking request/response calls
//! with no retries or caching; malformed JSON responses are reported with a
//! byte-accurate line/column/caret diagnostic.
//!
//! # Examples
//!
//! ```no_run
//! use trakt_client::TraktClient;
//!
//! let client = TraktClient::builder().api_key("my-api-key").build()?;
//!
//! for (i, show) in client.search_shows("Battlestar Galactica")?.iter().enumerate() {
//!     println!("[{}] -  {}", i, show.title);
//! }
//!
//! // One request per requested season, results in input order.
//! let seasons = client.seasons("battlestar-galactica-2003", &[1, 2])?;
//! # Ok::<(), trakt_client::TraktError>(())
//! ```

mod client;
mod diagnostics;
mod endpoint;
mod transport;
mod types;

pub use client::{TRAKT_BASE_URL, TraktClient, TraktClientBuilder, TraktError};
pub use diagnostics::highlight_byte_position;
pub use transport::{DEFAULT_TIMEOUT, TimeoutClient};
pub use types::{
    Actor, Director, Episode, Headshot, MaybeNum, Movie, MovieImages, People, Producer, Ratings,
    Season, Show, Stats, TopWatcher, Writer,
};
