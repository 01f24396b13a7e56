use crate::*;

use config::CommaScan;



/// Results of every condition from one `SMART_ASSERT!` invocation, together
/// with the source text of the whole condition list.
///
/// The text and results are expected to come from the same expression list;
/// index `i` of `results` is the `i`th comma-separated condition in `text`.
pub struct ConditionSet<'a, const N : usize>
{
	text 		: &'a str,
	results 	: [bool; N],
}

/// One condition's position in its set, plus its own slice of the source text.
/// Built while reporting a failure, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionRecord<'a>
{
	pub index 		: usize,
	pub is_first 	: bool,
	pub is_last 	: bool,
	pub is_only 	: bool,
	pub text 		: &'a str,
}

impl<'a, const N : usize> ConditionSet<'a, N>
{
	const NOT_EMPTY : () = assert!(N >= 1, "SMART_ASSERT() empty parameter list. At least one condition required");

	pub const fn new(text : &'a str, results : [bool; N]) -> Self
	{
		let () = Self::NOT_EMPTY;

		Self
		{
			text,
			results,
		}
	}

	pub const fn len(&self) -> usize
	{
		N
	}

	pub fn passed(&self, index : usize) -> bool
	{
		self.results[index]
	}

	pub fn any_failed(&self) -> bool
	{
		self.results.iter().any(|&result| !result)
	}

	/// Indices of false conditions, ascending.
	pub fn failing_indices(&self) -> impl Iterator<Item = usize> + '_
	{
		(0..self.len()).filter(|&index| !self.passed(index))
	}

	pub fn record(&self, index : usize, scan : CommaScan) -> ConditionRecord<'a>
	{
		ConditionRecord
		{
			index,
			is_first 	: index == 0,
			is_last 	: index == N - 1,
			is_only 	: N == 1,
			text 		: segment::condition_text(self.text, index, N, scan),
		}
	}
}



// Tests

#[test]
fn test_all_pass()
{
	let conditions = ConditionSet::new("a, b, c", [true, true, true]);

	assert_eq!(conditions.len(), 3);
	assert!(!conditions.any_failed());
	assert_eq!(conditions.failing_indices().count(), 0);
}

#[test]
fn test_every_failure_is_visited_in_order()
{
	let conditions = ConditionSet::new("a, b, c, d", [false, true, false, false]);

	assert!(conditions.any_failed());
	assert!(conditions.passed(1));
	assert!(!conditions.passed(3));
	assert_eq!(conditions.failing_indices().collect::<Vec<_>>(), vec![0, 2, 3]);
}

#[test]
fn test_records()
{
	let conditions = ConditionSet::new("a == 1, b == 2, c", [false, false, false]);

	let first = conditions.record(0, CommaScan::Nested);
	assert_eq!(first, ConditionRecord { index : 0, is_first : true, is_last : false, is_only : false, text : "a == 1" });

	let middle = conditions.record(1, CommaScan::Nested);
	assert!(!middle.is_first && !middle.is_last && !middle.is_only);
	assert_eq!(middle.text, "b == 2");

	let last = conditions.record(2, CommaScan::Nested);
	assert!(last.is_last && !last.is_first);
	assert_eq!(last.text, "c");

	let single = ConditionSet::new("x > 0", [false]);
	let only = single.record(0, CommaScan::Literal);
	assert!(only.is_only && only.is_first && only.is_last);
	assert_eq!(only.text, "x > 0");
}
