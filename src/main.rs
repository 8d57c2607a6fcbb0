use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use genrefy::{cli, config, error, types::FilterMode};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show how many tracks of a playlist carry each genre
    Genres(GenresOptions),

    /// List the tracks of a playlist with their genres
    Tracks(TracksOptions),

    /// Select the tracks of a playlist by genre
    Filter(FilterArgs),

    /// Filter a playlist step by step through prompts
    Interactive(InteractiveOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    /// Playlist URL, spotify:playlist: URI or id
    playlist: String,

    /// Only show the N most frequent genres
    #[clap(long)]
    limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Playlist URL, spotify:playlist: URI or id
    playlist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Playlist URL, spotify:playlist: URI or id
    playlist: String,

    /// Genre selection, comma separated in exact mode
    #[clap(long)]
    genre: String,

    /// How the selection is matched against track genres
    #[clap(long, value_enum, default_value_t = FilterMode::Exact)]
    mode: FilterMode,

    /// Append matching tracks to this file
    #[clap(long)]
    output: Option<PathBuf>,

    /// Save matching tracks as a new playlist with this name
    #[clap(long)]
    create: Option<String>,

    /// Description of the new playlist
    #[clap(long, requires = "create")]
    description: Option<String>,

    /// Make the new playlist public
    #[clap(long, requires = "create")]
    public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InteractiveOptions {
    /// How the selection is matched against track genres
    #[clap(long, value_enum, default_value_t = FilterMode::Exact)]
    mode: FilterMode,

    /// Append matching tracks to this file
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Genres(opt) => cli::genres(opt.playlist, opt.limit).await,
        Command::Tracks(opt) => cli::tracks(opt.playlist).await,
        Command::Filter(opt) => {
            cli::filter(cli::FilterOptions {
                playlist: opt.playlist,
                genre: opt.genre,
                mode: opt.mode,
                output: opt.output,
                create: opt.create,
                description: opt.description,
                public: opt.public,
            })
            .await
        }
        Command::Interactive(opt) => cli::interactive(opt.mode, opt.output).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
