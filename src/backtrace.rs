use std::io::Write;



#[derive(Debug, PartialEq, Eq)]
pub struct Frame
{
	pub function 	: String,
	pub source 		: String,
}

const MAX_FUNCTION_LENGTH : usize = 64;

/// Splits the `Display` form of `std::backtrace::Backtrace` into frames. Frames
/// without an `at` line get an empty source.
pub fn parse_frames(backtrace : &str) -> Vec<Frame>
{
	let mut frames : Vec<Frame> = Vec::new();

	for line in backtrace.lines()
	{
		let trimmed = line.trim();

		if let Some(source) = trimmed.strip_prefix("at ")
		{
			if let Some(frame) = frames.last_mut()
			{
				frame.source = String::from(source);
			}

			continue;
		}

		// "12: path::to::function"

		let function = match trimmed.split_once(": ")
		{
			Some((depth, function)) if depth.bytes().all(|b| b.is_ascii_digit()) => function,
			_ => continue,
		};

		frames.push(Frame { function : String::from(function), source : String::new() });
	}

	frames
}

/// Drops everything up to and including the assert machinery, and stops at the
/// program's `main`.
pub fn caller_frames(frames : Vec<Frame>) -> Vec<Frame>
{
	let first_caller = frames
		.iter()
		.rposition(|frame| frame.function.starts_with("smart_assert::assert_internal::check"))
		.map_or(0, |index| index + 1);

	let mut kept = Vec::new();

	for frame in frames.into_iter().skip(first_caller)
	{
		// BB (rs) To avoid tripping on some other random function called main, check
		//  that there's only one :: in the name.

		let is_main = frame.function.ends_with("::main") &&
			frame.function.rfind("::") == frame.function.find("::");

		kept.push(frame);

		if is_main
		{
			break;
		}
	}

	kept
}

/// Collapses generic arguments to `<...>` and keeps the tail of very long paths.
pub fn shorten_function(raw_function : &str) -> String
{
	let mut function = String::new();
	let mut bracket_depth = 0u32;

	for ch in raw_function.chars()
	{
		match ch
		{
			'<' =>
			{
				bracket_depth += 1;
				if bracket_depth == 1
				{
					function.push_str("<...");
				}
			}
			'>' if bracket_depth > 0 =>
			{
				bracket_depth -= 1;
				if bracket_depth == 0
				{
					function.push('>');
				}
			}
			_ if bracket_depth > 0 => {}
			_ => function.push(ch),
		}
	}

	let char_count = function.chars().count();

	if char_count > MAX_FUNCTION_LENGTH
	{
		let tail : String = function.chars().skip(char_count - MAX_FUNCTION_LENGTH).collect();
		function = format!("... {}", tail);
	}

	function
}

fn is_internal_frame(frame : &Frame) -> bool
{
	frame.source.contains("/rustc/")
}

/// Writes one line per frame, with runs of standard library frames folded into
/// a single `rust_internal` line.
pub fn write_frames<W>(frames : &[Frame], sink : &mut W)
	where W : Write
{
	use colored::*;

	let functions : Vec<String> = frames.iter().map(|frame| shorten_function(&frame.function)).collect();
	let width = functions.iter().map(|function| function.chars().count()).max().unwrap_or(0);

	let mut depth = 0;

	while depth < frames.len()
	{
		if is_internal_frame(&frames[depth])
		{
			let run = frames[depth..].iter().take_while(|frame| is_internal_frame(frame)).count();
			let last = depth + run - 1;

			let depth_string = match run
			{
				1 => format!("{}", depth),
				_ => format!("{}-{}", depth, last),
			};

			let _ = writeln!(
				sink,
				"{:>6} | {:width$} | {}",
				depth_string.blue(),
				functions[last],
				"rust_internal".dimmed());

			depth += run;
		}
		else
		{
			let _ = writeln!(
				sink,
				"{:>6} | {:width$} | {}{}",
				format!("{}", depth).blue(),
				functions[depth],
				"at ".dimmed(),
				frames[depth].source.dimmed());

			depth += 1;
		}
	}
}

pub fn print_condensed<W>(sink : &mut W)
	where W : Write
{
	let backtrace = std::backtrace::Backtrace::force_capture();
	let frames = caller_frames(parse_frames(&backtrace.to_string()));

	write_frames(&frames, sink);
}



// Tests

#[cfg(test)]
const SAMPLE_BACKTRACE : &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:9
   1: smart_assert::backtrace::print_condensed
             at ./src/backtrace.rs:180:18
   2: smart_assert::assert_internal::check
             at ./src/assert_internal.rs:140:3
   3: app::parse_header
             at ./src/main.rs:12:5
   4: core::ops::function::FnOnce::call_once
             at /rustc/abc/library/core/src/ops/function.rs:250:5
   5: std::sys::backtrace::__rust_begin_short_backtrace
             at /rustc/abc/library/std/src/sys/backtrace.rs:152:18
   6: app::main
             at ./src/main.rs:3:5
   7: std::rt::lang_start
   8: __libc_start_main";

#[test]
fn test_parse_frames()
{
	let frames = parse_frames(SAMPLE_BACKTRACE);

	assert_eq!(frames.len(), 9);
	assert_eq!(frames[3], Frame { function : String::from("app::parse_header"), source : String::from("./src/main.rs:12:5") });
	assert_eq!(frames[7].source, "");
}

#[test]
fn test_caller_frames()
{
	let frames = caller_frames(parse_frames(SAMPLE_BACKTRACE));
	let functions : Vec<&str> = frames.iter().map(|frame| frame.function.as_str()).collect();

	assert_eq!(
		functions,
		vec![
			"app::parse_header",
			"core::ops::function::FnOnce::call_once",
			"std::sys::backtrace::__rust_begin_short_backtrace",
			"app::main",
		]);
}

#[test]
fn test_shorten_function()
{
	assert_eq!(shorten_function("app::parse"), "app::parse");
	assert_eq!(shorten_function("<alloc::vec::Vec<T> as Drop>::drop"), "<...>::drop");
	assert_eq!(shorten_function("core::ptr::drop_in_place<app::Thing<u8>>"), "core::ptr::drop_in_place<...>");

	let long = format!("app::{}", "x".repeat(100));
	let short = shorten_function(&long);
	assert!(short.starts_with("... "));
	assert_eq!(short.chars().count(), MAX_FUNCTION_LENGTH + 4);
}

#[test]
fn test_write_frames_folds_internal_runs()
{
	let frames = caller_frames(parse_frames(SAMPLE_BACKTRACE));
	let mut sink = Vec::new();

	write_frames(&frames, &mut sink);

	let output = String::from_utf8(sink).unwrap();
	let lines : Vec<&str> = output.lines().collect();

	assert_eq!(lines.len(), 3);
	assert!(lines[0].contains("app::parse_header"));
	assert!(lines[1].contains("1-2") && lines[1].contains("rust_internal"));
	assert!(lines[2].contains("app::main"));
}
