use crate::*;

use std::fmt;
use std::io::Write;



pub const SKIP_DEBUG_CHECKS : bool = !config::ENABLE_DEBUG_ASSERTS;

/// Name of the item `call_site!()` declares inside the calling function, so its
/// type name spells out the caller's path.
pub const SITE_ITEM_SUFFIX : &str = "::__call_site";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite
{
		file_path 		: &'static str,
	pub line_number 	: u32,
		function_path 	: &'static str,
}

impl CallSite
{
	pub const fn new(
		file_path : &'static str,
		line_number : u32,
		function_path : &'static str) -> Self
	{
		Self
		{
			file_path,
			line_number,
			function_path,
		}
	}

	pub fn file_name(&self) -> &'static str
	{
		match self.file_path.rfind(['/', '\\'])
		{
			Some(index) 	=> &self.file_path[index + 1..],
			None 			=> self.file_path,
		}
	}

	/// Last path segment of the enclosing function, skipping closures.
	pub fn function_name(&self) -> &'static str
	{
		let mut path = self.function_path
			.strip_suffix(SITE_ITEM_SUFFIX)
			.unwrap_or(self.function_path);

		while let Some(outer) = path.strip_suffix("::{{closure}}")
		{
			path = outer;
		}

		match path.rfind("::")
		{
			Some(index) 	=> &path[index + 2..],
			None 			=> path,
		}
	}
}



/// Returned by the reporter once at least one condition failed. The only thing
/// to do with it is `terminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct TerminationSignal
{
	pub call_site 			: CallSite,
	pub failure_count 		: usize,
	pub condition_count 	: usize,
}

impl TerminationSignal
{
	pub const fn new(call_site : CallSite, failure_count : usize, condition_count : usize) -> Self
	{
		Self
		{
			call_site,
			failure_count,
			condition_count,
		}
	}

	pub fn terminate(self) -> !
	{
		match config::FAILURE_MODE
		{
			config::FailureMode::Abort =>
			{
				std::process::abort();
			}
			config::FailureMode::Panic =>
			{
				panic!("{}", self);
			}
		}
	}
}

impl fmt::Display for TerminationSignal
{
	fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(
			f,
			"smart assert failed: {} of {} conditions @ {}:{}",
			self.failure_count,
			self.condition_count,
			self.call_site.file_name(),
			self.call_site.line_number)
	}
}

impl std::error::Error for TerminationSignal {}



/// Reports every failed condition of a `SMART_ASSERT!` invocation to stderr.
/// Silent when everything passed.
pub fn check<const N : usize>(conditions : &ConditionSet<'_, N>, call_site : CallSite) -> Result<(), TerminationSignal>
{
	if !conditions.any_failed()
	{
		return Ok(());
	}

	// NOTE (rs) Holding the lock keeps one invocation's lines together when
	//  several threads fail at once.

	let stderr = std::io::stderr();
	let mut sink = stderr.lock();

	let result = Report::configured().write_failures(conditions, &call_site, &mut sink);

	if result.is_err() && config::PRINT_BACKTRACE
	{
		backtrace::print_condensed(&mut sink);
	}

	let _ = sink.flush();

	result
}

/// Disabled-mode landing spot: the conditions have been evaluated to build the
/// array, and nothing else happens.
#[inline(always)]
pub fn evaluate_only<const N : usize>(_results : [bool; N]) {}

pub fn type_name_of<T>(_ : T) -> &'static str
{
	std::any::type_name::<T>()
}



// Tests

#[test]
fn test_file_name()
{
	assert_eq!(CallSite::new("src/assert_internal.rs", 1, "").file_name(), "assert_internal.rs");
	assert_eq!(CallSite::new("module.rs", 1, "").file_name(), "module.rs");
	assert_eq!(CallSite::new("crates\\core\\lib.rs", 1, "").file_name(), "lib.rs");
}

#[test]
fn test_function_name()
{
	let site = CallSite::new("", 0, "app::parser::parse_header::__call_site");
	assert_eq!(site.function_name(), "parse_header");

	let site = CallSite::new("", 0, "app::Parser::next::{{closure}}::{{closure}}::__call_site");
	assert_eq!(site.function_name(), "next");

	let site = CallSite::new("", 0, "main");
	assert_eq!(site.function_name(), "main");
}

#[test]
fn test_call_site_macro()
{
	let site = crate::call_site!();

	assert_eq!(site.file_name(), "assert_internal.rs");
	assert_eq!(site.line_number, line!() - 3);
	assert_eq!(site.function_name(), "test_call_site_macro");

	let from_closure = (|| crate::call_site!())();
	assert_eq!(from_closure.function_name(), "test_call_site_macro");
}

#[test]
fn test_signal_display()
{
	let signal = TerminationSignal::new(CallSite::new("src/lib.rs", 7, "x::__call_site"), 2, 3);

	assert_eq!(signal.to_string(), "smart assert failed: 2 of 3 conditions @ lib.rs:7");
}

#[cfg(feature="panic_on_failures")]
#[test]
fn test_panic_mode_only_unwinds()
{
	let signal = TerminationSignal::new(CallSite::new("src/lib.rs", 7, "x::__call_site"), 1, 1);

	let result = std::panic::catch_unwind(|| signal.terminate());

	assert!(result.is_err());
}

#[test]
fn test_passing_asserts_return()
{
	let values = [1, 2, 3];

	for _ in 0..100
	{
		crate::SMART_ASSERT!(values.len() == 3);
		crate::SMART_ASSERT!(values[0] == 1, values[1] == 2, values.iter().sum::<i32>() == 6,);
	}
}

#[test]
fn test_every_condition_is_evaluated()
{
	let mut evaluated = Vec::new();
	let mut touch = |index : usize| { evaluated.push(index); true };

	crate::SMART_ASSERT!(touch(0), touch(1), touch(2));

	assert_eq!(evaluated, vec![0, 1, 2]);
}

#[cfg(not(feature="debug_mode"))]
#[test]
fn test_debug_assert_disabled_still_evaluates()
{
	let mut evaluated = 0;
	let mut touch = |result : bool| { evaluated += 1; result };

	crate::DEBUG_SMART_ASSERT!(touch(false), touch(true), touch(false));

	assert_eq!(evaluated, 3);
}

#[cfg(feature="debug_mode")]
#[test]
fn test_debug_assert_enabled_evaluates()
{
	let mut evaluated = 0;
	let mut touch = |result : bool| { evaluated += 1; result };

	crate::DEBUG_SMART_ASSERT!(touch(true), touch(true));

	assert_eq!(evaluated, 2);
}



// A failing assert ends the process, so it's run in a child copy of this test
//  binary that only does anything when the env var is set.

#[cfg(test)]
const FAILING_CHILD_ENV : &str = "SMART_ASSERT_FAILING_CHILD";

#[test]
fn failing_assert_child()
{
	if std::env::var_os(FAILING_CHILD_ENV).is_none()
	{
		return;
	}

	let a = 1;
	let b = 3;

	crate::SMART_ASSERT!(a == 1, b == 2, a > 5);

	println!("after failing assert");
}

#[test]
fn test_failing_assert_terminates()
{
	let exe = std::env::current_exe().unwrap();

	let output = std::process::Command::new(exe)
		.args(["--exact", "assert_internal::failing_assert_child", "--nocapture", "--test-threads=1"])
		.env(FAILING_CHILD_ENV, "1")
		.output()
		.unwrap();

	assert!(!output.status.success());

	#[cfg(unix)]
	if config::FAILURE_MODE == config::FailureMode::Abort
	{
		use std::os::unix::process::ExitStatusExt;
		assert_eq!(output.status.signal(), Some(6));
	}

	let stderr = String::from_utf8_lossy(&output.stderr);
	let lines : Vec<&str> = stderr
		.lines()
		.filter(|line| line.contains(report::FACILITY_TAG))
		.collect();

	assert_eq!(lines.len(), 2, "{}", stderr);
	assert!(lines[0].starts_with("assert_internal.rs:"));
	assert!(lines[0].ends_with(": failing_assert_child: SMART_ASSERT(): Condition 2: `b == 2` failed."));
	assert!(lines[1].ends_with(": failing_assert_child: SMART_ASSERT(): Condition 3: `a > 5` failed."));

	assert!(!String::from_utf8_lossy(&output.stdout).contains("after failing assert"));
}
