use std::fmt::Write;

pub fn encode(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut out = String::with_capacity(name.len());

	for (index, &c) in chars.iter().enumerate() {
		let legal = if index == 0 { is_name_start(c) } else { is_name_char(c) };

		if !legal || (c == '_' && escape_at(&chars[index..]).is_some()) {
			push_escaped(&mut out, c);
		} else {
			out.push(c);
		}
	}

	out
}

pub fn decode(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut out = String::with_capacity(name.len());
	let mut pending: Vec<u16> = Vec::new();
	let mut index = 0;

	while index < chars.len() {
		if let Some(unit) = escape_at(&chars[index..]) {
			pending.push(unit);
			index += 7;

			continue;
		}

		flush_units(&mut out, &mut pending);
		out.push(chars[index]);
		index += 1;
	}

	flush_units(&mut out, &mut pending);

	out
}

fn is_name_start(c: char) -> bool {
	c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
	is_name_start(c) || c.is_numeric() || c == '.' || c == '-'
}

fn push_escaped(out: &mut String, c: char) {
	let mut units = [0_u16; 2];

	for unit in c.encode_utf16(&mut units) {
		let _ = write!(out, "_x{unit:04X}_");
	}
}

fn escape_at(chars: &[char]) -> Option<u16> {
	if chars.len() < 7 || chars[0] != '_' || chars[1] != 'x' || chars[6] != '_' {
		return None;
	}

	let hex: String = chars[2..6].iter().collect();

	if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
		return None;
	}

	u16::from_str_radix(&hex, 16).ok()
}

fn flush_units(out: &mut String, pending: &mut Vec<u16>) {
	if pending.is_empty() {
		return;
	}

	out.extend(
		char::decode_utf16(pending.drain(..)).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
	);
}
