//! The Trakt API client facade.
//!
//! One method per API operation, each composing an endpoint template with the
//! GET-and-decode pipeline. All calls are synchronous and blocking; no
//! operation retries, batches, or deduplicates. The client configuration is
//! read-only after construction, so a single client may be shared across
//! threads.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::diagnostics::{byte_offset, highlight_byte_position};
use crate::endpoint::Endpoint;
use crate::transport::TimeoutClient;
use crate::types::{Episode, Movie, Season, Show};

/// Base URL for the Trakt.tv API.
pub const TRAKT_BASE_URL: &str = "https://api.trakt.tv";

/// Errors surfaced by client operations.
#[derive(Debug, Error)]
pub enum TraktError {
    /// Invalid client configuration or a caller contract violation,
    /// detected before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// DNS, connect, timeout or HTTP status errors from the underlying
    /// transport, propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON. Carries a pretty-printed
    /// excerpt with a caret under the offending byte.
    #[error(
        "syntax error in response at line {line}, column {column} (offset {offset}):\n{highlight}"
    )]
    Decode {
        line: usize,
        column: usize,
        offset: u64,
        highlight: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response was well-formed JSON that did not match the target
    /// shape.
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// The API reported a failure in its own JSON envelope, typically with
    /// HTTP 200.
    #[error("api error ({status}): {message}")]
    Api { status: String, message: String },

    /// A season batch aborted partway through. The already fetched seasons
    /// are preserved; slots after the failure hold only their season number.
    #[error("season batch incomplete: {source}")]
    PartialSeasons {
        seasons: Vec<Season>,
        #[source]
        source: Box<TraktError>,
    },
}

/// The error envelope the API uses to signal failures inside a 200 response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorEnvelope {
    status: String,
    error: String,
}

/// Client for the Trakt.tv API. Use [`TraktClient::builder`] to construct.
#[derive(Debug, Clone)]
pub struct TraktClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::blocking::Client,
    /// Username and pre-hashed password for optional basic auth
    credentials: Option<(String, String)>,
}

/// Builder for [`TraktClient`].
#[derive(Debug, Default)]
pub struct TraktClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::blocking::Client>,
    credentials: Option<(String, String)>,
}

impl TraktClientBuilder {
    /// Sets the API key (required).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the base URL, protocol and port included,
    /// e.g. `https://api.trakt.tv:443`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Injects a custom HTTP client, replacing the default timeout client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Configures basic-auth credentials. The password is SHA-1 hashed to
    /// lowercase hex before it is ever put on the wire, as the API expects.
    pub fn credentials(mut self, username: impl Into<String>, password: &str) -> Self {
        let hashed = hex::encode(Sha1::digest(password.as_bytes()));
        self.credentials = Some((username.into(), hashed));
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing or empty, and
    /// a transport error if the default HTTP client cannot be constructed.
    pub fn build(self) -> Result<TraktClient, TraktError> {
        let api_key = self.api_key.unwrap_or_default();
        if api_key.is_empty() {
            return Err(TraktError::Config("API key must not be empty".to_string()));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => TimeoutClient::default().build()?,
        };

        Ok(TraktClient {
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| TRAKT_BASE_URL.to_string()),
            http_client,
            credentials: self.credentials,
        })
    }
}

impl TraktClient {
    /// Returns a builder for configuring a new client.
    pub fn builder() -> TraktClientBuilder {
        TraktClientBuilder::default()
    }

    /// Searches TV shows matching the term, in response order.
    pub fn search_shows(&self, term: &str) -> Result<Vec<Show>, TraktError> {
        let url = Endpoint::ShowSearch { query: term }.resolve(&self.base_url, &self.api_key);
        self.get_json(&url)
    }

    /// Fetches the extended summary for a show, including its seasons and
    /// episodes when the API provides them.
    pub fn show(&self, id_or_slug: &str) -> Result<Show, TraktError> {
        let url = Endpoint::ShowSummary { id_or_slug }.resolve(&self.base_url, &self.api_key);
        self.get_json(&url)
    }

    /// Fetches episode listings for the requested seasons, one GET per
    /// season number, strictly sequential and in input order.
    ///
    /// The result always has one entry per requested season, at the index
    /// matching its position in the input. If a fetch fails the batch stops
    /// and the partially filled result is returned inside
    /// [`TraktError::PartialSeasons`]; entries after the failure carry only
    /// their season number.
    ///
    /// # Errors
    ///
    /// An empty `season_numbers` list is a caller contract violation and
    /// fails with a configuration error before any network call.
    pub fn seasons(
        &self,
        id_or_slug: &str,
        season_numbers: &[u32],
    ) -> Result<Vec<Season>, TraktError> {
        if season_numbers.is_empty() {
            return Err(TraktError::Config(
                "must specify which seasons to get".to_string(),
            ));
        }

        let mut results: Vec<Season> = season_numbers
            .iter()
            .map(|&season| Season {
                season,
                ..Season::default()
            })
            .collect();

        for (i, &season) in season_numbers.iter().enumerate() {
            let url = Endpoint::ShowSeason { id_or_slug, season }
                .resolve(&self.base_url, &self.api_key);
            match self.get_json::<Vec<Episode>>(&url) {
                Ok(episodes) => results[i].episodes = episodes,
                Err(source) => {
                    return Err(TraktError::PartialSeasons {
                        seasons: results,
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(results)
    }

    /// Searches movies matching the term, in response order.
    pub fn search_movies(&self, term: &str) -> Result<Vec<Movie>, TraktError> {
        let url = Endpoint::MovieSearch { query: term }.resolve(&self.base_url, &self.api_key);
        self.get_json(&url)
    }

    /// Fetches the summary for a movie by IMDB ID or slug.
    pub fn movie(&self, id_or_slug: &str) -> Result<Movie, TraktError> {
        let url = Endpoint::MovieSummary { id_or_slug }.resolve(&self.base_url, &self.api_key);
        self.get_json(&url)
    }

    /// Performs the GET and decodes the JSON body into the target type.
    ///
    /// Checks the API's failure envelope before anything else, since the API
    /// signals errors inside a 200 response. Transport and HTTP status
    /// errors propagate unchanged; JSON syntax errors are augmented with a
    /// line/column/caret diagnostic.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TraktError> {
        tracing::debug!(%url, "get query");

        let mut request = self.http_client.get(url);
        if let Some((username, hashed)) = &self.credentials {
            request = request.basic_auth(username, Some(hashed));
        }

        let response = request.send()?;
        let http_error = response.error_for_status_ref().err();
        let body = response.text()?;

        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
            if envelope.status == "failure" {
                return Err(TraktError::Api {
                    status: envelope.status,
                    message: envelope.error,
                });
            }
        }
        if let Some(source) = http_error {
            return Err(source.into());
        }

        serde_json::from_str(&body).map_err(|source: serde_json::Error| {
            // Only malformed or truncated JSON gets the caret diagnostic;
            // shape mismatches on valid JSON keep their own message.
            if !(source.is_syntax() || source.is_eof()) {
                return TraktError::Shape(source);
            }
            let offset = byte_offset(body.as_bytes(), source.line(), source.column());
            let (line, column, highlight) = highlight_byte_position(body.as_bytes(), offset);
            TraktError::Decode {
                line,
                column,
                offset,
                highlight,
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The client is blocking, so the mock server is driven on an explicitly
    // owned runtime while requests run on the test thread.
    fn start_server() -> (tokio::runtime::Runtime, MockServer) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = rt.block_on(MockServer::start());
        (rt, server)
    }

    fn client_for(server: &MockServer) -> TraktClient {
        TraktClient::builder()
            .api_key("testing")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = TraktClient::builder().api_key("").build().unwrap_err();
        assert!(matches!(err, TraktError::Config(_)));

        let err = TraktClient::builder().build().unwrap_err();
        assert!(matches!(err, TraktError::Config(_)));
    }

    #[test]
    fn test_show_search_returns_records_in_response_order() {
        let (rt, server) = start_server();
        let body = include_str!("../testdata/battlestar_tv_search.json");
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/search/shows.json/testing"))
                .and(query_param("query", "Battlestar Galactica"))
                .and(query_param("seasons", "true"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&server),
        );

        let shows = client_for(&server)
            .search_shows("Battlestar Galactica")
            .unwrap();
        assert_eq!(shows.len(), 5);
        assert_eq!(shows[0].title, "Battlestar Galactica (2003)");
        assert_eq!(shows[1].title, "Battlestar Galactica");
    }

    #[test]
    fn test_search_term_with_reserved_characters_reaches_server_intact() {
        let (rt, server) = start_server();
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/search/movies.json/testing"))
                .and(query_param("query", "bat man&co?"))
                .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
                .mount(&server),
        );

        let movies = client_for(&server).search_movies("bat man&co?").unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_show_summary_decodes_fixture() {
        let (rt, server) = start_server();
        let body = include_str!("../testdata/battlestar_tv_summary_extended.json");
        rt.block_on(
            Mock::given(method("GET"))
                .and(path(
                    "/show/summary.json/testing/battlestar-galactica-2003/extended",
                ))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&server),
        );

        let show = client_for(&server).show("battlestar-galactica-2003").unwrap();
        assert_eq!(show.title, "Battlestar Galactica (2003)");
        assert!(!show.seasons.is_empty());
    }

    #[test]
    fn test_seasons_returns_one_entry_per_requested_season() {
        let (rt, server) = start_server();
        let season_one = include_str!("../testdata/battlestar_season_one.json");
        rt.block_on(async {
            Mock::given(method("GET"))
                .and(path("/show/season.json/testing/73545/1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(season_one))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/show/season.json/testing/73545/2"))
                .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
                .mount(&server)
                .await;
        });

        let seasons = client_for(&server).seasons("73545", &[1, 2]).unwrap();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season, 1);
        assert_eq!(seasons[0].episodes.len(), 3);
        assert_eq!(seasons[0].episodes[0].title, "33");
        assert_eq!(seasons[1].season, 2);
        assert!(seasons[1].episodes.is_empty());
    }

    #[test]
    fn test_seasons_with_empty_list_makes_no_network_call() {
        let (rt, server) = start_server();

        let err = client_for(&server).seasons("73545", &[]).unwrap_err();
        assert!(matches!(err, TraktError::Config(_)));
        assert!(rt.block_on(server.received_requests()).unwrap().is_empty());
    }

    #[test]
    fn test_seasons_failure_mid_batch_preserves_partial_result() {
        let (rt, server) = start_server();
        let season_one = include_str!("../testdata/battlestar_season_one.json");
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/show/season.json/testing/73545/1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(season_one))
                .mount(&server),
        );
        // Season 7 is not mounted; wiremock answers 404.

        let err = client_for(&server).seasons("73545", &[1, 7]).unwrap_err();
        match err {
            TraktError::PartialSeasons { seasons, source } => {
                assert_eq!(seasons.len(), 2);
                assert_eq!(seasons[0].episodes.len(), 3);
                assert_eq!(seasons[1].season, 7);
                assert!(seasons[1].episodes.is_empty());
                assert!(matches!(*source, TraktError::Transport(_)));
            }
            other => panic!("expected PartialSeasons, got {other:?}"),
        }
        // The failing request must stop the batch: seasons 1 and 7 only.
        assert_eq!(rt.block_on(server.received_requests()).unwrap().len(), 2);
    }

    #[test]
    fn test_movie_search_decodes_all_records() {
        let (rt, server) = start_server();
        let body = include_str!("../testdata/batman_movie_search.json");
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/search/movies.json/testing"))
                .and(query_param("query", "batman"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&server),
        );

        let movies = client_for(&server).search_movies("batman").unwrap();
        assert_eq!(movies.len(), 30);
        assert_eq!(movies[0].imdb_id, "tt0096895");
    }

    #[test]
    fn test_movie_summary_decodes_nested_objects() {
        let (rt, server) = start_server();
        let body = include_str!("../testdata/batman_movie_summary.json");
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/movie/summary.json/testing/tt0096895"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&server),
        );

        let movie = client_for(&server).movie("tt0096895").unwrap();
        assert_eq!(movie.title, "Batman");
        assert_eq!(movie.year, 1989);
        assert_eq!(movie.people.directors[0].name, "Tim Burton");
        assert!(movie.stats.watchers > 0);
        // Age comes back as a number for some watchers and "" for others.
        assert_eq!(movie.top_watchers[0].age.as_i64(), Some(32));
        assert_eq!(movie.top_watchers[1].age.as_i64(), None);
    }

    #[test]
    fn test_api_failure_envelope_is_surfaced_as_api_error() {
        let (rt, server) = start_server();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string(
                    r#"{"status": "failure", "error": "show not found"}"#,
                ))
                .mount(&server),
        );

        let err = client_for(&server).show("no-such-show").unwrap_err();
        match err {
            TraktError::Api { status, message } => {
                assert_eq!(status, "failure");
                assert_eq!(message, "show not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_reports_line_column_and_caret() {
        let (rt, server) = start_server();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string("{\n\"title\": \"Batman\",\nbad\n}"),
                )
                .mount(&server),
        );

        let err = client_for(&server).movie("tt0096895").unwrap_err();
        match err {
            TraktError::Decode {
                line,
                column,
                offset,
                highlight,
                ..
            } => {
                // "bad" starts at byte 21: line 1 holds 2 bytes, line 2
                // holds 19, and the error is at the first column of line 3.
                assert_eq!(line, 3);
                assert_eq!(column, 1);
                assert_eq!(offset, 21);
                assert!(highlight.contains("    2: \"title\": \"Batman\","));
                assert!(highlight.contains(&format!("{}^", " ".repeat(column + 5))));
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_json_of_wrong_shape_is_not_a_syntax_error() {
        let (rt, server) = start_server();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(r#"{"title": "not an array"}"#),
                )
                .mount(&server),
        );

        // search_shows expects an array; an object is a shape mismatch,
        // not malformed JSON.
        let err = client_for(&server).search_shows("anything").unwrap_err();
        match err {
            TraktError::Shape(source) => assert!(source.is_data()),
            other => panic!("expected Shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_credentials_send_basic_auth_with_sha1_hashed_password() {
        let (rt, server) = start_server();
        // base64("user:" + sha1_hex("secret"))
        rt.block_on(
            Mock::given(method("GET"))
                .and(wiremock::matchers::header(
                    "authorization",
                    "Basic dXNlcjplNWU5ZmExYmEzMWVjZDFhZTg0Zjc1Y2FhYTQ3NGYzYTY2M2YwNWY0",
                ))
                .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
                .mount(&server),
        );

        let client = TraktClient::builder()
            .api_key("testing")
            .base_url(server.uri())
            .credentials("user", "secret")
            .build()
            .unwrap();

        // Only a request carrying the hashed credentials matches the mock;
        // anything else comes back 404 and would fail the call.
        assert!(client.search_shows("anything").unwrap().is_empty());
    }

    #[test]
    fn test_http_error_propagates_as_transport_error() {
        let (rt, server) = start_server();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
                .mount(&server),
        );

        let err = client_for(&server).search_shows("anything").unwrap_err();
        assert!(matches!(err, TraktError::Transport(_)));
    }
}
