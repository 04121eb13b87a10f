use crate::escape;

const WILDCARD: char = '*';
const OP_REQUIRED: char = '+';
const OP_EXCLUDED: char = '-';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Occur {
	Should,
	Must,
	MustNot,
}
impl Occur {
	fn prefix(self) -> &'static str {
		match self {
			Self::Should => "",
			Self::Must => "+",
			Self::MustNot => "-",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Term {
	occur: Occur,
	value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TextQuery {
	Phrase(String),
	Terms(Vec<Term>),
}
impl TextQuery {
	pub(crate) fn parse(text: &str, force_and_terms: bool) -> Option<Self> {
		if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
			let inner = &text[1..text.len() - 1];

			if inner.trim().is_empty() {
				return None;
			}

			return Some(Self::Phrase(escape::phrase(inner)));
		}

		let mut terms = Vec::new();

		for token in text.split_whitespace() {
			let (occur, token) = if let Some(rest) = token.strip_prefix(OP_EXCLUDED) {
				(Occur::MustNot, rest)
			} else if let Some(rest) = token.strip_prefix(OP_REQUIRED) {
				(Occur::Must, rest)
			} else {
				(Occur::Should, token)
			};

			if token.is_empty() {
				continue;
			}

			let occur = if force_and_terms && occur == Occur::Should { Occur::Must } else { occur };

			terms.push(Term { occur, value: match_value(token) });
		}

		if terms.is_empty() { None } else { Some(Self::Terms(terms)) }
	}

	pub(crate) fn clause(&self, field: &str) -> String {
		match self {
			Self::Phrase(phrase) => format!("{field}:{phrase}"),
			Self::Terms(terms) if terms.len() == 1 => render_term(field, &terms[0]),
			Self::Terms(terms) => {
				let parts: Vec<String> = terms.iter().map(|term| render_term(field, term)).collect();

				format!("({})", parts.join(" OR "))
			},
		}
	}
}

pub(crate) fn match_value(value: &str) -> String {
	match value.strip_prefix(WILDCARD) {
		Some(rest) => format!("{WILDCARD}{}", escape::escape_term(rest)),
		None => format!("{}{WILDCARD}", escape::escape_term(value)),
	}
}

fn render_term(field: &str, term: &Term) -> String {
	format!("{}{field}:{}", term.occur.prefix(), term.value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_term_gets_prefix_wildcard() {
		let text = TextQuery::parse("report", false).expect("searchable");

		assert_eq!(text.clause("TEXT"), "TEXT:report*");
	}

	#[test]
	fn leading_wildcard_is_a_suffix_match() {
		assert_eq!(match_value("*port"), "*port");
		assert_eq!(match_value("*"), "*");
		assert_eq!(match_value("*a(b"), "*a\\(b");
		assert_eq!(match_value("rep*rt"), "rep\\*rt*");
	}

	#[test]
	fn multiple_terms_form_a_disjunction() {
		let text = TextQuery::parse("annual  report", false).expect("searchable");

		assert_eq!(text.clause("TEXT"), "(TEXT:annual* OR TEXT:report*)");
	}

	#[test]
	fn operators_are_stripped_and_applied() {
		let text = TextQuery::parse("+annual -draft report", false).expect("searchable");

		assert_eq!(text.clause("TEXT"), "(+TEXT:annual* OR -TEXT:draft* OR TEXT:report*)");
	}

	#[test]
	fn forced_and_leaves_exclusions_alone() {
		let text = TextQuery::parse("annual -draft", true).expect("searchable");

		assert_eq!(text.clause("TEXT"), "(+TEXT:annual* OR -TEXT:draft*)");
	}

	#[test]
	fn quoted_phrase_is_not_tokenized() {
		let text = TextQuery::parse("\"annual report\"", false).expect("searchable");

		assert_eq!(text.clause("TEXT"), "TEXT:\"annual report\"");
	}

	#[test]
	fn bare_operators_and_empty_phrases_are_not_searchable() {
		assert_eq!(TextQuery::parse("+ -", false), None);
		assert_eq!(TextQuery::parse("\"  \"", false), None);
	}
}
