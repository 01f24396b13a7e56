// General library config

pub mod config;

// Assertions

pub mod assert;
pub mod assert_internal;
pub use assert_internal::{ CallSite, TerminationSignal };

// Conditions and their source text

pub mod condition;
pub use condition::*;

pub mod segment;

// Diagnostics

pub mod report;
pub use report::*;

mod backtrace;
