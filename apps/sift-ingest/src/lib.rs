use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sift_service::{IngestReport, IngestStatus, SiftService};

#[derive(Debug, Parser)]
#[command(
	version = sift_cli::VERSION,
	rename_all = "kebab",
	styles = sift_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Link list to read instead of `corpus.links_path`.
	#[arg(long, value_name = "FILE")]
	pub links: Option<PathBuf>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let mut config = sift_config::load(&args.config)?;

	if let Some(links) = args.links {
		config.corpus.links_path = Some(links);
	}

	init_tracing(&config);

	let sift = SiftService::new(config);
	let mut corpus = sift.load_corpus()?;
	let links = sift.load_links()?;

	tracing::info!(profiles = corpus.len(), links = links.len(), "Starting ingestion.");

	let report = sift.ingest(&mut corpus, &links).await;

	if report.ingested() > 0 {
		sift.save_corpus(&corpus)?;

		tracing::info!(
			profiles = corpus.len(),
			path = %sift.cfg.corpus.path.display(),
			"Corpus saved."
		);
	}

	print!("{}", render_report(&report));

	Ok(())
}

pub fn render_report(report: &IngestReport) -> String {
	let mut out = String::new();

	for outcome in &report.outcomes {
		let line = match &outcome.status {
			IngestStatus::Ingested => format!("ingested  {}\n", outcome.link),
			IngestStatus::Skipped => format!("skipped   {}\n", outcome.link),
			IngestStatus::Failed { reason } => format!("failed    {}: {reason}\n", outcome.link),
		};

		out.push_str(&line);
	}

	out.push_str(&format!(
		"{} ingested, {} skipped, {} failed\n",
		report.ingested(),
		report.skipped(),
		report.failed()
	));

	out
}

fn init_tracing(config: &sift_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod tests {
	use sift_service::IngestOutcome;

	use super::*;

	#[test]
	fn one_line_per_link_then_totals() {
		let report = IngestReport {
			outcomes: vec![
				IngestOutcome { link: "https://a".to_string(), status: IngestStatus::Ingested },
				IngestOutcome {
					link: "https://b".to_string(),
					status: IngestStatus::Failed { reason: "HTTP 404".to_string() },
				},
			],
		};

		assert_eq!(
			render_report(&report),
			"ingested  https://a\nfailed    https://b: HTTP 404\n1 ingested, 0 skipped, 1 failed\n"
		);
	}
}
