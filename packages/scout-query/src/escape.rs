use time::Date;

use scout_domain::QName;

const TERM_RESERVED: &[char] = &[
	'\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&', '/',
];
const FIELD_RESERVED: &[char] =
	&['\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&'];

pub fn escape_term(value: &str) -> String {
	escape_with(value, |c| TERM_RESERVED.contains(&c) || c.is_whitespace())
}

pub fn escape_phrase(value: &str) -> String {
	escape_with(value, |c| c == '\\' || c == '"')
}

pub fn phrase(value: &str) -> String {
	format!("\"{}\"", escape_phrase(value))
}

pub fn field(qname: &QName) -> String {
	format!(
		"@{}",
		escape_with(&qname.to_string(), |c| FIELD_RESERVED.contains(&c) || c.is_whitespace())
	)
}

pub fn date_bound(date: Date, end_of_day: bool) -> String {
	let time = if end_of_day { "23:59:59" } else { "00:00:00" };

	format!("{:04}-{:02}-{:02}T{time}", date.year(), u8::from(date.month()), date.day())
}

pub(crate) fn has_unbalanced_quotes(value: &str) -> bool {
	let mut escaped = false;
	let mut count = 0_usize;

	for c in value.chars() {
		if escaped {
			escaped = false;

			continue;
		}

		match c {
			'\\' => escaped = true,
			'"' => count += 1,
			_ => {},
		}
	}

	count % 2 == 1
}

fn escape_with(value: &str, reserved: impl Fn(char) -> bool) -> String {
	let mut out = String::with_capacity(value.len() + 4);

	for c in value.chars() {
		if reserved(c) {
			out.push('\\');
		}

		out.push(c);
	}

	out
}

#[cfg(test)]
mod tests {
	use time::macros::date;

	use super::*;

	#[test]
	fn escapes_reserved_term_characters() {
		assert_eq!(escape_term("a+b(c)"), "a\\+b\\(c\\)");
		assert_eq!(escape_term("what?*"), "what\\?\\*");
		assert_eq!(escape_term("two words"), "two\\ words");
		assert_eq!(escape_term("naïve"), "naïve");
	}

	#[test]
	fn phrase_escapes_only_quotes_and_backslashes() {
		assert_eq!(phrase("say \"hi\" (now)"), "\"say \\\"hi\\\" (now)\"");
		assert_eq!(phrase("c:\\temp"), "\"c:\\\\temp\"");
	}

	#[test]
	fn field_escapes_clark_notation() {
		let qname = QName::new("http://example.com/model/1.0", "title");

		assert_eq!(field(&qname), "@\\{http\\://example.com/model/1.0\\}title");
	}

	#[test]
	fn field_escapes_whitespace_in_local_names() {
		let qname = QName::new("http://example.com/model/1.0", "my title");

		assert_eq!(field(&qname), "@\\{http\\://example.com/model/1.0\\}my\\ title");
	}

	#[test]
	fn date_bounds_are_day_aligned() {
		assert_eq!(date_bound(date!(2020-03-07), false), "2020-03-07T00:00:00");
		assert_eq!(date_bound(date!(2020-03-07), true), "2020-03-07T23:59:59");
	}

	#[test]
	fn detects_unbalanced_quotes() {
		assert!(has_unbalanced_quotes("\"open"));
		assert!(!has_unbalanced_quotes("\"closed\""));
		assert!(!has_unbalanced_quotes("escaped \\\" quote"));
		assert!(!has_unbalanced_quotes("none"));
	}
}
