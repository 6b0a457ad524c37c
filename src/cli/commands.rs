use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use tracing::debug;

use crate::cli::browse::run_browse;
use crate::cli::render::{
    NO_MATCHES_MESSAGE, NoMatchesOutput, SelectionOutput, StatsOutput, render_header,
    render_selection, render_stats,
};
use crate::filters::ContentFilter;
use crate::sampler::Strategy;
use crate::session::Session;
use crate::utils::{format_path_with_tilde, get_max_archive_bytes, get_seed_from_env};

#[derive(Parser)]
#[command(name = "archive-sampler")]
#[command(version)]
#[command(about = "Resurface random posts from a Twitter/X archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FilterArgs {
    /// Leave out retweets (posts starting with "RT ")
    #[arg(long)]
    pub hide_retweets: bool,
    /// Leave out replies
    #[arg(long)]
    pub hide_replies: bool,
}

impl FilterArgs {
    pub fn content_filter(&self) -> ContentFilter {
        ContentFilter::new(self.hide_retweets, self.hide_replies)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show random posts from an archive
    Show {
        /// Path to tweets.js (or a JSON array of tweets)
        archive: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Strategy::Balanced)]
        strategy: Strategy,
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of posts to draw
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible draws (defaults to ARCHIVE_SAMPLER_SEED)
        #[arg(long)]
        seed: Option<u64>,
        /// Print one JSON object per post, or a single `{"error": "no_matches", ...}` object
        /// when the filters leave no posts
        #[arg(long)]
        json: bool,
    },
    /// Show statistics about an archive
    Stats {
        archive: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Browse an archive one post at a time, reading commands from stdin
    Browse {
        archive: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Strategy::Balanced)]
        strategy: Strategy,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Show { archive, strategy, filters, count, seed, json }) => {
            show_posts(archive, *strategy, filters.content_filter(), *count, *seed, *json)?;
        }
        Some(Commands::Stats { archive, filters, json }) => {
            show_stats(archive, filters.content_filter(), *json)?;
        }
        Some(Commands::Browse { archive, strategy, filters, seed }) => {
            let mut session = open_session(archive, filters.content_filter(), *strategy, *seed)?;
            run_browse(&mut session, io::stdin().lock(), &mut io::stdout().lock())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Build a session and load the archive, honoring the seed and size-cap settings
fn open_session(
    archive: &Path,
    filter: ContentFilter,
    strategy: Strategy,
    seed: Option<u64>,
) -> Result<Session<StdRng>> {
    let seed = match seed {
        Some(seed) => Some(seed),
        None => get_seed_from_env()?,
    };
    let session = match seed {
        Some(seed) => {
            debug!("Using seed {}", seed);
            Session::with_seed(seed)
        }
        None => Session::from_entropy(),
    };
    let mut session = session.configured(filter, strategy);

    let max_bytes = get_max_archive_bytes()?;
    session
        .load_file(archive, Some(max_bytes))
        .with_context(|| format!("Could not load archive {}", format_path_with_tilde(archive)))?;
    Ok(session)
}

fn show_posts(
    archive: &Path,
    strategy: Strategy,
    filter: ContentFilter,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(archive, filter, strategy, seed)?;

    if session.current().is_none() {
        if json {
            println!("{}", serde_json::to_string(&NoMatchesOutput::default())?);
        } else {
            println!("{}", NO_MATCHES_MESSAGE);
        }
        return Ok(());
    }

    let now = Utc::now();
    for i in 0..count {
        if i > 0 {
            session.next();
        }
        let Some(selection) = session.current() else {
            break;
        };

        if json {
            println!("{}", serde_json::to_string(&SelectionOutput::new(selection, &now))?);
        } else {
            if i > 0 {
                println!("---");
            }
            println!("{}", render_header(session.view().len(), session.strategy()));
            println!();
            println!("{}", render_selection(selection, &now));
        }
    }

    Ok(())
}

fn show_stats(archive: &Path, filter: ContentFilter, json: bool) -> Result<()> {
    let session = open_session(archive, filter, Strategy::default(), Some(0))?;
    let stats = StatsOutput::new(session.view(), session.histogram());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render_stats(&stats, &format_path_with_tilde(archive)));
    }

    Ok(())
}
