use crate::{Error, Result};

/// Parses a list literal such as `['went to Yale', "speaks Mandarin"]`.
///
/// Items must be single- or double-quoted strings; a trailing comma is allowed.
pub fn parse_query_list(input: &str) -> Result<Vec<String>> {
	let mut parser = Parser { chars: input.char_indices().peekable(), len: input.len() };

	parser.skip_whitespace();
	parser.expect('[')?;

	let mut queries = Vec::new();

	loop {
		parser.skip_whitespace();

		if parser.eat(']') {
			break;
		}

		queries.push(parser.string()?);
		parser.skip_whitespace();

		if parser.eat(']') {
			break;
		}

		parser.expect(',')?;
	}

	parser.skip_whitespace();

	if let Some((offset, c)) = parser.chars.next() {
		return Err(Error::InvalidQueryList {
			offset,
			message: format!("unexpected {c:?} after the closing bracket"),
		});
	}

	Ok(queries)
}

struct Parser<'a> {
	chars: std::iter::Peekable<std::str::CharIndices<'a>>,
	len: usize,
}
impl Parser<'_> {
	fn offset(&mut self) -> usize {
		self.chars.peek().map(|(offset, _)| *offset).unwrap_or(self.len)
	}

	fn skip_whitespace(&mut self) {
		while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
	}

	fn eat(&mut self, expected: char) -> bool {
		self.chars.next_if(|(_, c)| *c == expected).is_some()
	}

	fn expect(&mut self, expected: char) -> Result<()> {
		let offset = self.offset();

		match self.chars.next() {
			Some((_, c)) if c == expected => Ok(()),
			Some((_, c)) => Err(Error::InvalidQueryList {
				offset,
				message: format!("expected {expected:?}, found {c:?}"),
			}),
			None => Err(Error::InvalidQueryList {
				offset,
				message: format!("expected {expected:?}, found end of input"),
			}),
		}
	}

	fn string(&mut self) -> Result<String> {
		let offset = self.offset();
		let quote = match self.chars.next() {
			Some((_, c @ ('\'' | '"'))) => c,
			Some((_, c)) =>
				return Err(Error::InvalidQueryList {
					offset,
					message: format!("expected a quoted string, found {c:?}"),
				}),
			None =>
				return Err(Error::InvalidQueryList {
					offset,
					message: "expected a quoted string, found end of input".to_string(),
				}),
		};
		let mut value = String::new();

		loop {
			match self.chars.next() {
				Some((_, c)) if c == quote => return Ok(value),
				Some((escape_at, '\\')) => match self.chars.next() {
					Some((_, 'n')) => value.push('\n'),
					Some((_, 't')) => value.push('\t'),
					Some((_, c @ ('\\' | '\'' | '"'))) => value.push(c),
					Some((_, c)) => {
						value.push('\\');
						value.push(c);
					},
					None =>
						return Err(Error::InvalidQueryList {
							offset: escape_at,
							message: "dangling escape".to_string(),
						}),
				},
				Some((_, c)) => value.push(c),
				None =>
					return Err(Error::InvalidQueryList {
						offset,
						message: "unterminated string".to_string(),
					}),
			}
		}
	}
}
