use crate::*;

use config::{ CommaScan, LabelStyle };
use std::fmt;
use std::io::Write;



pub const FACILITY_TAG : &str = "SMART_ASSERT()";

/// One diagnostic line for a failed condition, without the trailing newline:
///
/// `main.rs:12: parse: SMART_ASSERT(): Condition 2: `b == 2` failed.`
pub struct DiagnosticLine<'a>
{
	pub call_site 	: &'a CallSite,
	pub record 		: ConditionRecord<'a>,
	pub style 		: LabelStyle,
}

impl fmt::Display for DiagnosticLine<'_>
{
	fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(
			f,
			"{}:{}: {}: {}: Condition ",
			self.call_site.file_name(),
			self.call_site.line_number,
			self.call_site.function_name(),
			FACILITY_TAG)?;

		let number = self.record.index + 1;
		let text = self.record.text;

		match (self.record.is_only, self.record.is_first, self.style)
		{
			(true, _, _) 						=> write!(f, "`{}`", text)?,
			(false, true, LabelStyle::Numbered) => write!(f, "#{}: `{}`", number, text)?,
			(false, _, _) 						=> write!(f, "{}: `{}`", number, text)?,
		}

		write!(f, " failed.")
	}
}



/// Writes one line per failed condition, in index order.
#[derive(Debug, Clone, Copy)]
pub struct Report
{
	pub scan 	: CommaScan,
	pub style 	: LabelStyle,
}

impl Report
{
	pub const fn new(scan : CommaScan, style : LabelStyle) -> Self
	{
		Self { scan, style }
	}

	/// Uses the segmentation and label style selected by crate features.
	pub const fn configured() -> Self
	{
		Self::new(config::COMMA_SCAN, config::LABEL_STYLE)
	}

	/// Nothing is written when every condition passed. Otherwise every failure
	/// is written and the returned signal must be acted on by the caller.
	pub fn write_failures<W, const N : usize>(
		&self,
		conditions 	: &ConditionSet<'_, N>,
		call_site 	: &CallSite,
		sink 		: &mut W) -> Result<(), TerminationSignal>
		where W : Write
	{
		let mut failure_count = 0;

		for index in conditions.failing_indices()
		{
			let line = DiagnosticLine
			{
				call_site,
				record 	: conditions.record(index, self.scan),
				style 	: self.style,
			};

			// BB (rs) Nothing useful to do if stderr itself is broken, we're
			//  terminating either way.

			let _ = writeln!(sink, "{}", line);

			failure_count += 1;
		}

		match failure_count
		{
			0 => Ok(()),
			_ => Err(TerminationSignal::new(*call_site, failure_count, conditions.len())),
		}
	}
}



// Tests

#[cfg(test)]
fn test_site() -> CallSite
{
	CallSite::new("src/deep/dir/main.rs", 42, "app::deep::parse_header::__call_site")
}

#[cfg(test)]
fn report_lines<const N : usize>(report : Report, text : &str, results : [bool; N]) -> (Vec<String>, Option<TerminationSignal>)
{
	let conditions = ConditionSet::new(text, results);
	let mut sink = Vec::new();

	let result = report.write_failures(&conditions, &test_site(), &mut sink);
	let output = String::from_utf8(sink).unwrap();

	(output.lines().map(String::from).collect(), result.err())
}

#[test]
fn test_all_pass_writes_nothing()
{
	for _ in 0..3
	{
		let (lines, signal) = report_lines(Report::new(CommaScan::Nested, LabelStyle::Numbered), "a, b", [true, true]);

		assert!(lines.is_empty());
		assert!(signal.is_none());
	}
}

#[test]
fn test_single_condition_line()
{
	let (lines, signal) = report_lines(Report::new(CommaScan::Literal, LabelStyle::Numbered), "x > 0", [false]);

	assert_eq!(lines, vec!["main.rs:42: parse_header: SMART_ASSERT(): Condition `x > 0` failed."]);

	let signal = signal.unwrap();
	assert_eq!(signal.failure_count, 1);
	assert_eq!(signal.condition_count, 1);
}

#[test]
fn test_second_of_two_has_plain_label()
{
	let a = 1;
	let b = 3;
	let (lines, signal) = report_lines(Report::new(CommaScan::Literal, LabelStyle::Numbered), "a == 1, b == 2", [a == 1, b == 2]);

	assert_eq!(lines, vec!["main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `b == 2` failed."]);
	assert_eq!(signal.unwrap().failure_count, 1);
}

#[test]
fn test_first_label_styles()
{
	let (lines, _) = report_lines(Report::new(CommaScan::Literal, LabelStyle::Numbered), "a, b", [false, false]);
	assert_eq!(
		lines,
		vec![
			"main.rs:42: parse_header: SMART_ASSERT(): Condition #1: `a` failed.",
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `b` failed.",
		]);

	let (lines, _) = report_lines(Report::new(CommaScan::Literal, LabelStyle::Uniform), "a, b", [false, false]);
	assert_eq!(
		lines,
		vec![
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 1: `a` failed.",
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `b` failed.",
		]);
}

#[test]
fn test_three_failures_nested_call()
{
	let text = "f(), g(x, y), h()";

	let (lines, signal) = report_lines(Report::new(CommaScan::Nested, LabelStyle::Numbered), text, [false, false, false]);
	assert_eq!(
		lines,
		vec![
			"main.rs:42: parse_header: SMART_ASSERT(): Condition #1: `f()` failed.",
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `g(x, y)` failed.",
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 3: `h()` failed.",
		]);
	assert_eq!(signal.unwrap().failure_count, 3);

	let (lines, _) = report_lines(Report::new(CommaScan::Literal, LabelStyle::Numbered), text, [false, false, false]);
	assert_eq!(lines[1], "main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `g(x` failed.");
}

#[test]
fn test_only_failures_are_reported()
{
	let (lines, signal) = report_lines(
		Report::new(CommaScan::Nested, LabelStyle::Numbered),
		"a,   b, c, d",
		[true, false, true, false]);

	assert_eq!(
		lines,
		vec![
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 2: `b` failed.",
			"main.rs:42: parse_header: SMART_ASSERT(): Condition 4: `d` failed.",
		]);

	let signal = signal.unwrap();
	assert_eq!(signal.failure_count, 2);
	assert_eq!(signal.condition_count, 4);
}
