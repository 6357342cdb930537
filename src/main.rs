use clap::Parser;
use tracing::warn;

use trivia_quiz::api::{TriviaClient, DEFAULT_BASE_URL};
use trivia_quiz::Quiz;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the trivia question API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trivia_quiz=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = TriviaClient::new(&args.api_url);

    // Without the category list the filter simply stays on "Any".
    let categories = match client.fetch_categories().await {
        Ok(categories) => categories,
        Err(err) => {
            warn!(error = %err, "failed to fetch categories");
            Vec::new()
        }
    };

    if let Err(e) = Quiz::new(client, categories).run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
