use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use sift_cli::{output, queries};
use sift_domain::Corpus;
use sift_service::SiftService;

const MENU: &str = "\nAvailable commands:\n\
- 'Single': Search with a single query\n\
- 'List': Search with multiple queries\n\
- 'Q': Quit\n";
const QUIT: &str = "Q";

/// Reads commands until `Q` or end of input. Search failures are printed and the loop goes on.
pub async fn run_loop<R, W>(
	sift: &SiftService,
	corpus: &Corpus,
	reader: R,
	mut writer: W,
) -> color_eyre::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	let mut lines = reader.lines();

	loop {
		writer.write_all(MENU.as_bytes()).await?;

		let Some(command) = prompt(&mut lines, &mut writer, "Enter command: ").await? else {
			break;
		};

		match command.trim() {
			QUIT => break,
			"Single" => {
				let Some(query) = prompt(&mut lines, &mut writer, "Enter your query:\n").await?
				else {
					break;
				};
				let block = match sift.search(corpus, &query).await {
					Ok(report) => output::render_report(&report),
					Err(err) => format!("Search failed: {err}\n"),
				};

				writer.write_all(block.as_bytes()).await?;
			},
			"List" =>
				if !run_list(sift, corpus, &mut lines, &mut writer).await? {
					break;
				},
			_ => writer.write_all(b"Invalid command. Please try again.\n").await?,
		}
	}

	writer.flush().await?;

	Ok(())
}

/// Returns `false` when input ended.
async fn run_list<R, W>(
	sift: &SiftService,
	corpus: &Corpus,
	lines: &mut Lines<R>,
	writer: &mut W,
) -> color_eyre::Result<bool>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	loop {
		let Some(input) = prompt(
			lines,
			writer,
			"Enter your queries as ['query1', 'query2', ...] or 'Q' to exit:\n",
		)
		.await?
		else {
			return Ok(false);
		};

		if input.trim() == QUIT {
			return Ok(true);
		}

		let list = match queries::parse_query_list(&input) {
			Ok(list) => list,
			Err(err) => {
				let message = format!(
					"Error parsing input: {err}\nPlease ensure your input is formatted correctly, e.g., ['query1', 'query2']\n"
				);

				writer.write_all(message.as_bytes()).await?;

				continue;
			},
		};
		let results = sift.search_batch(corpus, &list).await;
		let mut out = String::new();

		for (query, result) in list.iter().zip(results) {
			match result {
				Ok(report) => out.push_str(&output::render_report(&report)),
				Err(err) => out.push_str(&format!("Search failed for '{query}': {err}\n")),
			}
		}

		writer.write_all(out.as_bytes()).await?;

		return Ok(true);
	}
}

async fn prompt<R, W>(
	lines: &mut Lines<R>,
	writer: &mut W,
	message: &str,
) -> color_eyre::Result<Option<String>>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	writer.write_all(message.as_bytes()).await?;
	writer.flush().await?;

	Ok(lines.next_line().await?)
}
