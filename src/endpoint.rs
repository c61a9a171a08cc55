//! URL templates for the Trakt API endpoints.
//!
//! Each API operation has a fixed URL pattern with placeholders for the base
//! host, the API key, a primary query parameter and (for season listings) a
//! season number. Resolution is pure string substitution; every substituted
//! value is percent-escaped so that reserved characters in a search term or
//! slug can never change the target endpoint or drop query parameters.

use urlencoding::encode;

/// A single Trakt API endpoint together with its per-call parameters.
///
/// The base host and API key are injected by the client at resolution time,
/// not carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Endpoint<'a> {
    /// Show search: <https://trakt.tv/api-docs/search-shows>
    ShowSearch { query: &'a str },
    /// Extended show summary: <https://trakt.tv/api-docs/show-summary>
    ShowSummary { id_or_slug: &'a str },
    /// Episode listing for one season: <https://trakt.tv/api-docs/show-season>
    ShowSeason { id_or_slug: &'a str, season: u32 },
    /// Movie search: <https://trakt.tv/api-docs/search-movies>
    MovieSearch { query: &'a str },
    /// Movie summary: <https://trakt.tv/api-docs/movie-summary>
    MovieSummary { id_or_slug: &'a str },
}

impl Endpoint<'_> {
    /// Resolves the endpoint pattern into a full URL.
    pub fn resolve(&self, host: &str, api_key: &str) -> String {
        let key = encode(api_key);
        let url = match self {
            Endpoint::ShowSearch { query } => {
                format!(
                    "{host}/search/shows.json/{key}?query={}&seasons=true",
                    encode(query)
                )
            }
            Endpoint::ShowSummary { id_or_slug } => {
                format!(
                    "{host}/show/summary.json/{key}/{}/extended",
                    encode(id_or_slug)
                )
            }
            Endpoint::ShowSeason { id_or_slug, season } => {
                format!(
                    "{host}/show/season.json/{key}/{}/{season}",
                    encode(id_or_slug)
                )
            }
            Endpoint::MovieSearch { query } => {
                format!("{host}/search/movies.json/{key}?query={}", encode(query))
            }
            Endpoint::MovieSummary { id_or_slug } => {
                format!("{host}/movie/summary.json/{key}/{}", encode(id_or_slug))
            }
        };
        tracing::debug!(%url, "resolved api url");
        url
    }
}
