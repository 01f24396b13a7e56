use crate::*;

use config::CommaScan;



/// Iterator over the byte positions of separator commas in a joined
/// condition text.
///
/// With `CommaScan::Nested`, commas inside `()`, `[]`, `{}`, turbofish
/// arguments (`::<A, B>`), string literals and char literals don't count, so
/// `f(x, y), g()` has a single separator.
pub struct Separators<'a>
{
	text 			: &'a str,
	index 			: usize,
	depth 			: u32,
	generic_depth 	: u32,
	scan 			: CommaScan,
}

impl<'a> Separators<'a>
{
	pub fn new(text : &'a str, scan : CommaScan) -> Self
	{
		Self
		{
			text,
			index 			: 0,
			depth 			: 0,
			generic_depth 	: 0,
			scan,
		}
	}

	// Number of `#`s in front of the quote at `quote` if it opens a raw string
	//  (`r"`, `r#"`, `br"`, ...).

	fn raw_string_hashes(&self, quote : usize) -> Option<usize>
	{
		let before = &self.text.as_bytes()[..quote];
		let hashes = before.iter().rev().take_while(|&&b| b == b'#').count();

		match before.len().checked_sub(hashes + 1).map(|r| before[r])
		{
			Some(b'r') 	=> Some(hashes),
			_ 			=> None,
		}
	}

	fn skip_raw_string_literal(&mut self, hashes : usize)
	{
		let bytes = self.text.as_bytes();

		while self.index < bytes.len()
		{
			let byte = bytes[self.index];
			self.index += 1;

			if byte == b'"'
			{
				let closing = bytes[self.index..].iter().take_while(|&&b| b == b'#').count();

				if closing >= hashes
				{
					self.index += hashes;
					return;
				}
			}
		}
	}

	fn skip_string_literal(&mut self)
	{
		let bytes = self.text.as_bytes();

		while self.index < bytes.len()
		{
			let byte = bytes[self.index];
			self.index += 1;

			match byte
			{
				b'\\' 	=> self.index += 1,
				b'"' 	=> return,
				_ 		=> {}
			}
		}
	}

	fn skip_char_literal(&mut self)
	{
		// NOTE (rs) A quote is also how lifetimes and loop labels start, so only
		//  skip when a closing quote shows up where a char literal would end.

		let bytes = self.text.as_bytes();

		if bytes.get(self.index) == Some(&b'\\')
		{
			let escaped = bytes.get(self.index + 2..).unwrap_or_default();

			if let Some(offset) = escaped.iter().position(|&b| b == b'\'')
			{
				self.index += offset + 3;
			}

			return;
		}

		let char_len = match self.text.get(self.index..).and_then(|rest| rest.chars().next())
		{
			Some(ch) 	=> ch.len_utf8(),
			None 		=> return,
		};

		if bytes.get(self.index + char_len) == Some(&b'\'')
		{
			self.index += char_len + 1;
		}
	}
}

impl Iterator for Separators<'_>
{
	type Item = usize;

	fn next(&mut self) -> Option<usize>
	{
		let bytes = self.text.as_bytes();

		while self.index < bytes.len()
		{
			let position = self.index;
			self.index += 1;

			match (self.scan, bytes[position])
			{
				(_, b',') if self.depth == 0 && self.generic_depth == 0 =>
				{
					return Some(position);
				}
				(CommaScan::Literal, _) => {}
				(CommaScan::Nested, b'(' | b'[' | b'{') =>
				{
					self.depth += 1;
				}
				(CommaScan::Nested, b')' | b']' | b'}') =>
				{
					self.depth = self.depth.saturating_sub(1);
				}
				(CommaScan::Nested, b'<') =>
				{
					// Outside a turbofish `<` is a comparison or shift

					if self.generic_depth > 0 || bytes[..position].ends_with(b"::")
					{
						self.generic_depth += 1;
					}
				}
				(CommaScan::Nested, b'>') =>
				{
					// `->` inside `Fn(A) -> B` arguments
					let is_arrow = position > 0 && bytes[position - 1] == b'-';

					if self.generic_depth > 0 && !is_arrow
					{
						self.generic_depth -= 1;
					}
				}
				(CommaScan::Nested, b'"') =>
				{
					match self.raw_string_hashes(position)
					{
						Some(hashes) 	=> self.skip_raw_string_literal(hashes),
						None 			=> self.skip_string_literal(),
					}
				}
				(CommaScan::Nested, b'\'') =>
				{
					self.skip_char_literal();
				}
				_ => {}
			}
		}

		None
	}
}



/// Byte position of the `comma_count`th separator comma (1-based), or `None`
/// if the text has fewer separators than that.
pub fn nth_comma_position(text : &str, comma_count : usize, scan : CommaScan) -> Option<usize>
{
	let skip = comma_count.checked_sub(1)?;
	Separators::new(text, scan).nth(skip)
}

/// Number of literal `' '` characters at the start of `text`.
pub fn leading_spaces(text : &str) -> usize
{
	text.bytes().take_while(|&b| b == b' ').count()
}

/// Source text of condition `index` out of `count` conditions joined in `text`.
///
/// The run of spaces after the preceding separator is dropped, trailing text
/// is left alone. If the separators the index needs aren't there (the text
/// doesn't match `count`), the result runs to the end of `text` instead.
pub fn condition_text(text : &str, index : usize, count : usize, scan : CommaScan) -> &str
{
	if count <= 1
	{
		return text;
	}

	if index == 0
	{
		return match nth_comma_position(text, 1, scan)
		{
			Some(end) 	=> &text[..end],
			None 		=> text,
		};
	}

	let start = match nth_comma_position(text, index, scan)
	{
		Some(prefix_comma) 	=> prefix_comma + 1,
		None 				=> return text,
	};

	let start = start + leading_spaces(&text[start..]);

	if index == count - 1
	{
		return &text[start..];
	}

	match nth_comma_position(text, index + 1, scan)
	{
		Some(end) 	=> &text[start..end],
		None 		=> &text[start..],
	}
}



// Tests

#[test]
fn test_nth_comma_position()
{
	let text = "a, b,c";

	assert_eq!(nth_comma_position(text, 1, CommaScan::Literal), Some(1));
	assert_eq!(nth_comma_position(text, 2, CommaScan::Literal), Some(4));
	assert_eq!(nth_comma_position(text, 3, CommaScan::Literal), None);
	assert_eq!(nth_comma_position(text, 0, CommaScan::Literal), None);
	assert_eq!(nth_comma_position("", 1, CommaScan::Nested), None);
}

#[test]
fn test_leading_spaces()
{
	assert_eq!(leading_spaces(""), 0);
	assert_eq!(leading_spaces("x"), 0);
	assert_eq!(leading_spaces("   x y"), 3);
	assert_eq!(leading_spaces("\tx"), 0);
}

#[test]
fn test_single_condition_is_whole_text()
{
	for scan in [CommaScan::Literal, CommaScan::Nested]
	{
		assert_eq!(condition_text("x > 0", 0, 1, scan), "x > 0");
		assert_eq!(condition_text(" f(a, b) ", 0, 1, scan), " f(a, b) ");
	}
}

#[test]
fn test_first_last_and_interior()
{
	let text = "a == 1, b == 2, c == 3";

	for scan in [CommaScan::Literal, CommaScan::Nested]
	{
		assert_eq!(condition_text(text, 0, 3, scan), "a == 1");
		assert_eq!(condition_text(text, 1, 3, scan), "b == 2");
		assert_eq!(condition_text(text, 2, 3, scan), "c == 3");
	}
}

#[test]
fn test_last_keeps_trailing_text()
{
	assert_eq!(condition_text("a, b  ", 1, 2, CommaScan::Literal), "b  ");
}

#[test]
fn test_leading_space_run_is_dropped()
{
	assert_eq!(condition_text("a,   b", 1, 2, CommaScan::Literal), "b");
	assert_eq!(condition_text("a,b", 1, 2, CommaScan::Literal), "b");
	assert_eq!(condition_text("a,    b,  c", 1, 3, CommaScan::Literal), "b");
	assert_eq!(condition_text("a, b  c, d", 1, 3, CommaScan::Literal), "b  c");

	// Only spaces, not other whitespace
	assert_eq!(condition_text("a,\tb", 1, 2, CommaScan::Literal), "\tb");
}

#[test]
fn test_literal_scan_splits_nested_commas()
{
	let text = "f(), g(x, y), h()";

	assert_eq!(condition_text(text, 0, 3, CommaScan::Literal), "f()");
	assert_eq!(condition_text(text, 1, 3, CommaScan::Literal), "g(x");
	assert_eq!(condition_text(text, 2, 3, CommaScan::Literal), "y), h()");
}

#[test]
fn test_nested_scan_keeps_nested_commas()
{
	let text = "f(), g(x, y), h()";

	assert_eq!(condition_text(text, 0, 3, CommaScan::Nested), "f()");
	assert_eq!(condition_text(text, 1, 3, CommaScan::Nested), "g(x, y)");
	assert_eq!(condition_text(text, 2, 3, CommaScan::Nested), "h()");

	let text = "v == [1, 2], m.get(&(0, 1)).is_some(), S { a: 1, b: 2 }.ok()";

	assert_eq!(condition_text(text, 0, 3, CommaScan::Nested), "v == [1, 2]");
	assert_eq!(condition_text(text, 1, 3, CommaScan::Nested), "m.get(&(0, 1)).is_some()");
	assert_eq!(condition_text(text, 2, 3, CommaScan::Nested), "S { a: 1, b: 2 }.ok()");
}

#[test]
fn test_nested_scan_skips_literals()
{
	let text = r#"s == "a,\"b", c == ',', d == '\'', e"#;

	assert_eq!(condition_text(text, 0, 4, CommaScan::Nested), r#"s == "a,\"b""#);
	assert_eq!(condition_text(text, 1, 4, CommaScan::Nested), "c == ','");
	assert_eq!(condition_text(text, 2, 4, CommaScan::Nested), r"d == '\''");
	assert_eq!(condition_text(text, 3, 4, CommaScan::Nested), "e");

	let text = "c == 'é', x";
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "x");
}

#[test]
fn test_nested_scan_allows_lifetimes()
{
	let text = "check::<'static>(r), x";

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), "check::<'static>(r)");
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "x");
}

#[test]
fn test_nested_scan_skips_raw_strings()
{
	let text = r#"s == r"\", x"#;

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), r#"s == r"\""#);
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "x");

	let text = r##"p == r#"a", "b"#, b == br"C:\", q"##;

	assert_eq!(condition_text(text, 0, 3, CommaScan::Nested), r##"p == r#"a", "b"#"##);
	assert_eq!(condition_text(text, 1, 3, CommaScan::Nested), r#"b == br"C:\""#);
	assert_eq!(condition_text(text, 2, 3, CommaScan::Nested), "q");

	// A variable named `r` in front of a plain string
	let text = r#"r == "x,\"", z"#;

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), r#"r == "x,\"""#);
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "z");
}

#[test]
fn test_nested_scan_keeps_turbofish_arguments()
{
	let text = "HashMap::<u8, u8>::new().is_empty(), true";

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), "HashMap::<u8, u8>::new().is_empty()");
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "true");

	let text = "f::<Vec<u8>, u8>(), x < y, z > w";

	assert_eq!(condition_text(text, 0, 3, CommaScan::Nested), "f::<Vec<u8>, u8>()");
	assert_eq!(condition_text(text, 1, 3, CommaScan::Nested), "x < y");
	assert_eq!(condition_text(text, 2, 3, CommaScan::Nested), "z > w");

	let text = "call::<fn(u8) -> u8, u8>(), x >> 1 == 0";

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), "call::<fn(u8) -> u8, u8>()");
	assert_eq!(condition_text(text, 1, 2, CommaScan::Nested), "x >> 1 == 0");
}

#[test]
fn test_nested_scan_splits_qualified_path_generics()
{
	// Without `::` in front, `<` reads as a comparison, so these still split
	let text = "<HashMap<u8, u8>>::new().is_empty(), x";

	assert_eq!(condition_text(text, 0, 2, CommaScan::Nested), "<HashMap<u8");
	assert_eq!(nth_comma_position(text, 2, CommaScan::Nested), Some(35));
}

#[test]
fn test_missing_separators_fall_back()
{
	assert_eq!(condition_text("a", 0, 2, CommaScan::Literal), "a");
	assert_eq!(condition_text("a", 1, 2, CommaScan::Literal), "a");
	assert_eq!(condition_text("a, b", 1, 3, CommaScan::Literal), "b");
	assert_eq!(condition_text("f(a, b)", 1, 2, CommaScan::Nested), "f(a, b)");
}

#[cfg(test)]
proptest::proptest!
{
	#[test]
	fn prop_spaces_after_separator_are_dropped(spaces in 0usize..16, name in "[a-z_][a-z0-9_]{0,8}")
	{
		let text = format!("first,{}{}", " ".repeat(spaces), name);

		proptest::prop_assert_eq!(condition_text(&text, 1, 2, CommaScan::Literal), name.as_str());
		proptest::prop_assert_eq!(condition_text(&text, 1, 2, CommaScan::Nested), name.as_str());
	}

	#[test]
	fn prop_segments_rejoin_to_text(names in proptest::collection::vec("[a-z]{1,6}( == [0-9]{1,3})?", 1..8))
	{
		let text = names.join(", ");

		for (index, name) in names.iter().enumerate()
		{
			proptest::prop_assert_eq!(condition_text(&text, index, names.len(), CommaScan::Nested), name.as_str());
		}
	}
}
