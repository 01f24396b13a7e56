#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureMode
{
	Abort,
	Panic,
}

/// How the joined condition text is split back into individual conditions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommaScan
{
	/// Every `,` is a separator, even inside a call like `g(x, y)`.
	Literal,

	/// Commas nested in brackets or quotes belong to their condition.
	Nested,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LabelStyle
{
	/// `#1:`, then `2:`, `3:` ...
	Numbered,

	/// `1:`, `2:`, `3:` ...
	Uniform,
}

#[cfg(feature="panic_on_failures")]
mod cfg_failure
{
	use super::FailureMode;

	pub const FAILURE_MODE 		: FailureMode	= FailureMode::Panic;
}

#[cfg(not(feature="panic_on_failures"))]
mod cfg_failure
{
	use super::FailureMode;

	pub const FAILURE_MODE 		: FailureMode	= FailureMode::Abort;
}

mod cfg_text
{
	use super::{ CommaScan, LabelStyle };

	#[cfg(feature="literal_segmentation")] 			pub const COMMA_SCAN 	: CommaScan 	= CommaScan::Literal;
	#[cfg(not(feature="literal_segmentation"))] 	pub const COMMA_SCAN 	: CommaScan 	= CommaScan::Nested;

	#[cfg(feature="uniform_labels")] 				pub const LABEL_STYLE 	: LabelStyle 	= LabelStyle::Uniform;
	#[cfg(not(feature="uniform_labels"))] 			pub const LABEL_STYLE 	: LabelStyle 	= LabelStyle::Numbered;
}

pub const ENABLE_DEBUG_ASSERTS 	: bool = cfg!(feature="debug_mode");
pub const PRINT_BACKTRACE 		: bool = cfg!(feature="backtrace_on_failure");

pub use cfg_failure::*;
pub use cfg_text::*;
