pub mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use sift_service::SiftService;

#[derive(Debug, Parser)]
#[command(
	version = sift_cli::VERSION,
	rename_all = "kebab",
	styles = sift_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Run the interactive prompt. This is the default.
	Interactive,
	/// Search once for each query and print the results.
	Search {
		#[arg(required = true, value_name = "QUERY")]
		queries: Vec<String>,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = sift_config::load(&args.config)?;

	init_tracing(&config);

	let sift = SiftService::new(config);
	let corpus = sift.load_corpus()?;

	tracing::info!(
		profiles = corpus.len(),
		path = %sift.cfg.corpus.path.display(),
		"Corpus loaded."
	);

	if corpus.is_empty() {
		tracing::warn!("Corpus is empty. Run sift-ingest to populate it.");
	}

	match args.command.unwrap_or(Command::Interactive) {
		Command::Interactive => {
			let stdin = tokio::io::BufReader::new(tokio::io::stdin());

			interactive::run_loop(&sift, &corpus, stdin, tokio::io::stdout()).await
		},
		Command::Search { queries } => search_once(&sift, &corpus, &queries).await,
	}
}

async fn search_once(
	sift: &SiftService,
	corpus: &sift_domain::Corpus,
	queries: &[String],
) -> color_eyre::Result<()> {
	let results = sift.search_batch(corpus, queries).await;
	let mut failed = 0;

	for (query, result) in queries.iter().zip(results) {
		match result {
			Ok(report) => print!("{}", sift_cli::output::render_report(&report)),
			Err(err) => {
				failed += 1;

				eprintln!("Search failed for '{query}': {err}");
			},
		}
	}

	if failed > 0 {
		return Err(eyre::eyre!("{failed} of {} queries failed.", queries.len()));
	}

	Ok(())
}

fn init_tracing(config: &sift_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
