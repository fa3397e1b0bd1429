use anyhow::{Context, Result};
use catalog::{genres_for_mood, Mood};
use clap::{Parser, Subcommand};
use colored::Colorize;
use omdb_client::{MovieRecord, OmdbClient};
use resolver::{RecommendationResolver, RecommendationSet};
use voice::{
    HttpTranscriber, ListenConfig, Listener, Microphone, MoodMatch, VoiceError, VoiceMoodResolver,
};

/// Mood Movies - mood and voice based movie recommender
#[derive(Parser)]
#[command(name = "mood-movies")]
#[command(about = "Get movie suggestions for your mood, or look up any title", long_about = None)]
struct Cli {
    /// OMDb API key
    #[arg(long, env = "OMDB_API_KEY")]
    api_key: String,

    /// OMDb endpoint URL
    #[arg(long, default_value = omdb_client::DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for a mood (picked or spoken)
    Recommend {
        /// Your name (required to proceed)
        #[arg(long)]
        name: Option<String>,

        /// Your mood (see `moods` for the supported set)
        #[arg(long, conflicts_with = "voice")]
        mood: Option<String>,

        /// Speak your mood instead of picking one
        #[arg(long)]
        voice: bool,

        /// Also look up a specific movie title (optional)
        #[arg(long)]
        search: Option<String>,

        /// Speech-to-text endpoint, used with --voice
        #[arg(long, env = "STT_URL", default_value = "http://localhost:8085/transcribe")]
        stt_url: String,
    },

    /// Look up a single movie title, regardless of mood
    Search {
        /// Movie title to look up
        #[arg(long)]
        title: String,
    },

    /// List the supported moods and their genres
    Moods,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = OmdbClient::new(cli.api_key, cli.api_url)
        .context("Failed to build OMDb client")?;
    let resolver = RecommendationResolver::new(client);

    match cli.command {
        Commands::Recommend {
            name,
            mood,
            voice,
            search,
            stt_url,
        } => handle_recommend(&resolver, name, mood, voice, search, stt_url).await?,
        Commands::Search { title } => handle_search(&resolver, &title).await,
        Commands::Moods => handle_moods(),
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    resolver: &RecommendationResolver<OmdbClient>,
    name: Option<String>,
    mood: Option<String>,
    voice: bool,
    search: Option<String>,
    stt_url: String,
) -> Result<()> {
    // Name is required to proceed; a missing name blocks the whole flow
    // with a single warning.
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        println!("{}", "Please enter your name to continue (--name).".yellow());
        return Ok(());
    };

    let mood_label = if voice {
        capture_spoken_mood(stt_url).await?
    } else {
        mood
    };

    let Some(mood_label) = mood_label else {
        println!("{}", "Please select your mood or speak it clearly.".yellow());
        return Ok(());
    };

    // Optional direct title search, rendered before the mood picks.
    if let Some(query) = search {
        handle_search(resolver, &query).await;
    }

    let set = resolver.resolve(&mood_label).await;
    let Some(mood) = set.mood else {
        println!(
            "{} Supported moods: {}",
            format!("'{}' is not a supported mood.", mood_label.trim()).yellow(),
            mood_list()
        );
        return Ok(());
    };

    println!(
        "\n{}",
        format!("Because you're feeling {mood}, {name}, try these picks:")
            .bold()
            .magenta()
    );
    print_recommendations(&set);
    Ok(())
}

/// Capture a spoken mood, returning its label when one was recognized.
///
/// Every failure mode degrades to a printed message and `None`; the user
/// can always retry with --mood.
async fn capture_spoken_mood(stt_url: String) -> Result<Option<String>> {
    let heard = tokio::task::spawn_blocking(move || {
        let transcriber = HttpTranscriber::new(stt_url)?;
        let voice_resolver =
            VoiceMoodResolver::new(Listener::new(ListenConfig::default()), transcriber);
        println!(
            "{}",
            "Speak your mood clearly into the microphone...".cyan()
        );
        let mut mic = Microphone::open()?;
        voice_resolver.capture_mood(&mut mic)
    })
    .await
    .context("Voice capture task panicked")?;

    match heard {
        Ok(transcript) => match voice::match_mood(&transcript) {
            MoodMatch::Recognized(mood) => {
                println!(
                    "{}",
                    format!("You said you're feeling {mood}").green()
                );
                Ok(Some(mood.label().to_string()))
            }
            MoodMatch::Unsupported(heard) => {
                println!(
                    "{} Supported moods: {}",
                    format!("Heard '{heard}', but that is not a supported mood.").yellow(),
                    mood_list()
                );
                Ok(None)
            }
        },
        Err(VoiceError::Unintelligible) => {
            println!(
                "{}",
                "Could not understand your voice. Please try again or use --mood.".yellow()
            );
            Ok(None)
        }
        Err(e) => {
            // Service or device failure: surfaced, mood left unset.
            println!("{}", e.to_string().red());
            Ok(None)
        }
    }
}

/// Handle the 'search' command (and the --search option of 'recommend')
async fn handle_search(resolver: &RecommendationResolver<OmdbClient>, title: &str) {
    match resolver.search_title(title).await {
        Ok(record) if record.found => {
            println!("\n{}", format!("Search result for '{title}':").bold().blue());
            print_card(&record);
        }
        Ok(_) => {
            println!(
                "{}",
                "Movie not found. Please check spelling or try another title.".red()
            );
        }
        Err(e) => {
            // Non-fatal: the rest of the interaction can continue.
            println!("{}", e.to_string().yellow());
        }
    }
}

/// Handle the 'moods' command
fn handle_moods() {
    println!("{}", "Supported moods:".bold().blue());
    for mood in Mood::ALL {
        let genres = genres_for_mood(mood)
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} {} [{}]", "•".green(), mood, genres);
    }
}

/// Format and print one recommendation set as result cards
fn print_recommendations(set: &RecommendationSet) {
    for record in &set.records {
        print_card(record);
    }
    for title in &set.unavailable {
        println!(
            "{}",
            format!("Could not reach the metadata service for '{title}'.").yellow()
        );
    }
    if set.records.is_empty() {
        println!(
            "{}",
            "No recommendations could be fetched right now. Please try again.".yellow()
        );
    }
}

/// One movie card: title, rating, genre, plot, links.
fn print_card(record: &MovieRecord) {
    if record.year.is_empty() {
        println!("{}", record.title.bold());
    } else {
        println!("{} ({})", record.title.bold(), record.year);
    }
    match record.rating {
        Some(rating) => println!("  IMDb: {}", format!("{rating:.1}").yellow()),
        None => println!("  IMDb: not available"),
    }
    if !record.genre.is_empty() {
        println!("  Genre: {}", record.genre);
    }
    if !record.plot.is_empty() {
        println!("  {}", record.plot);
    }
    if !record.poster.is_empty() {
        println!("  Poster: {}", record.poster);
    }
    if let Some(url) = record.imdb_url() {
        println!("  {}", url.blue().underline());
    }
    println!();
}

fn mood_list() -> String {
    Mood::ALL
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join(", ")
}
