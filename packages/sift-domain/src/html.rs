use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

const DROPPED_ELEMENTS: [&str; 6] = ["script", "style", "noscript", "header", "footer", "nav"];

static MAIN: LazyLock<Selector> = LazyLock::new(|| selector("main"));
static MAIN_CONTENT_DIV: LazyLock<Selector> = LazyLock::new(|| selector("div.main-content"));

/// Visible text of the page's main content.
///
/// The first `<main>` element wins, then the first `div.main-content`, then the whole
/// document. Boilerplate elements and anything nested in them never contribute text.
pub fn extract_main_content(html: &str) -> String {
	let document = Html::parse_document(html);
	let region = document
		.select(&MAIN)
		.find(is_visible)
		.or_else(|| document.select(&MAIN_CONTENT_DIV).find(is_visible))
		.unwrap_or_else(|| document.root_element());

	visible_text(region)
}

/// Text nodes under `region` outside dropped elements, with whitespace collapsed.
fn visible_text(region: ElementRef<'_>) -> String {
	let pieces = region
		.descendants()
		.filter_map(|node| {
			let text = node.value().as_text()?;
			let hidden = node
				.ancestors()
				.take_while(|ancestor| ancestor.id() != region.id())
				.filter_map(ElementRef::wrap)
				.any(|element| is_dropped(&element));

			(!hidden).then_some(&**text)
		})
		.collect::<Vec<_>>()
		.join(" ");

	pieces.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_visible(element: &ElementRef<'_>) -> bool {
	!element.ancestors().filter_map(ElementRef::wrap).any(|ancestor| is_dropped(&ancestor))
}

fn is_dropped(element: &ElementRef<'_>) -> bool {
	DROPPED_ELEMENTS.contains(&element.value().name())
}

fn selector(css: &str) -> Selector {
	Selector::parse(css).unwrap_or_else(|err| panic!("Selector {css:?} must parse: {err:?}."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefers_main_element() {
		let html = "<html><header>Firm Nav</header><main><h1>Jane Doe</h1><p>Media law</p></main><footer>(c) Firm</footer></html>";

		assert_eq!(extract_main_content(html), "Jane Doe Media law");
	}

	#[test]
	fn falls_back_to_main_content_div() {
		let html = r#"<body><div class="wrapper main-content"><p>Partner &amp; Counsel</p></div></body>"#;

		assert_eq!(extract_main_content(html), "Partner & Counsel");
	}

	#[test]
	fn main_content_div_stops_at_its_own_end() {
		let html = r#"<body><div class="main-content"><div><p>Jane Doe, media law</p></div><p>Partner</p></div><div class="sidebar"><p>Other lawyers: John Roe</p></div></body>"#;

		assert_eq!(extract_main_content(html), "Jane Doe, media law Partner");
	}

	#[test]
	fn boilerplate_inside_main_is_dropped() {
		let html = "<main><nav>Back to team</nav><p>Jane Doe</p><script>track();</script></main>";

		assert_eq!(extract_main_content(html), "Jane Doe");
	}

	#[test]
	fn falls_back_to_whole_document_without_boilerplate() {
		let html = "<body><nav>Home</nav><script>var x = 1;</script><p>Bar No. 12345</p><!-- hidden --></body>";

		assert_eq!(extract_main_content(html), "Bar No. 12345");
	}

	#[test]
	fn main_inside_boilerplate_is_ignored() {
		let html = r#"<body><header><main>Site menu</main></header><div class="main-content">Jane Doe</div></body>"#;

		assert_eq!(extract_main_content(html), "Jane Doe");
	}
}
