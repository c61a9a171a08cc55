use clap::{Parser, ValueEnum};
use std::process;
use trakt_client::TraktClient;

/// Search Trakt.tv for movies or TV shows.
#[derive(Debug, Parser)]
#[command(name = "trakt", version, about)]
struct Cli {
    /// Trakt.TV API key
    #[arg(long = "apikey")]
    api_key: String,

    /// What to search for
    #[arg(value_enum)]
    kind: Kind,

    /// Search term
    term: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Movie,
    Show,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match TraktClient::builder().api_key(&cli.api_key).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating trakt client: {e}");
            process::exit(1);
        }
    };

    match cli.kind {
        Kind::Movie => match client.search_movies(&cli.term) {
            Ok(movies) => {
                for (i, movie) in movies.iter().enumerate() {
                    println!("[{}] -  {}", i, movie.title);
                }
            }
            Err(e) => {
                eprintln!("Error searching for movies matching \"{}\": {e}", cli.term);
                process::exit(1);
            }
        },
        Kind::Show => match client.search_shows(&cli.term) {
            Ok(shows) => {
                for (i, show) in shows.iter().enumerate() {
                    println!("[{}] -  {}", i, show.title);
                }
            }
            Err(e) => {
                eprintln!("Error searching for shows matching \"{}\": {e}", cli.term);
                process::exit(1);
            }
        },
    }
}
