// Multi-condition assert. Every condition is evaluated (no short-circuit), each
//  false one gets its own line on stderr, and then the process is terminated.
//
//  SMART_ASSERT!(header.len() == 4, version > 1, checksum(&data) == expected);

/// ```rust
/// use smart_assert::SMART_ASSERT;
///
/// let header = [0u8; 4];
/// SMART_ASSERT!(header.len() == 4, header[0] == 0);
/// ```
///
/// At least one condition is required:
///
/// ```compile_fail
/// smart_assert::SMART_ASSERT!();
/// ```
#[macro_export]
macro_rules! SMART_ASSERT
{
	() =>
	{
		compile_error!("SMART_ASSERT() empty parameter list. At least one condition required")
	};
	{ $( $condition:expr ),+ $(,)? } =>
	{
		{
			let conditions = $crate::ConditionSet::new(
				stringify!($( $condition ),+),
				[$( $condition ),+]);

			if let Err(signal) = $crate::assert_internal::check(&conditions, $crate::call_site!())
			{
				signal.terminate();
			}
		}
	};
}



// Same as SMART_ASSERT!, but only enforced with the `debug_mode` feature. Without
//  it the conditions still run, so side effects don't depend on the build mode.

#[macro_export]
macro_rules! DEBUG_SMART_ASSERT
{
	() =>
	{
		compile_error!("DEBUG_SMART_ASSERT() empty parameter list. At least one condition required")
	};
	{ $( $condition:expr ),+ $(,)? } =>
	{
		if $crate::assert_internal::SKIP_DEBUG_CHECKS
		{
			$crate::assert_internal::evaluate_only([$( $condition ),+]);
		}
		else
		{
			$crate::SMART_ASSERT!{ $( $condition ),+ }
		}
	};
}



#[doc(hidden)]
#[macro_export]
macro_rules! call_site
{
	() =>
	{
		$crate::CallSite::new(
			file!(),
			line!(),
			{
				fn __call_site() {}
				$crate::assert_internal::type_name_of(__call_site)
			})
	};
}
