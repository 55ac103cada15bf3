//! Helper macros for exported entry points.

/// Generate an exported `extern "C"` entry point.
///
/// # Usage
///
/// ```ignore
/// abi_fn! {
///     /// Doc comment for the function.
///     fn rrl_example(handle: RRLHandle) -> c_int {
///         // raw pointer access needs explicit unsafe blocks
///     }
/// }
/// ```
///
/// Expands to `#[unsafe(no_mangle)] pub unsafe extern "C" fn` with the given
/// signature. Every symbol generated here must also be listed in
/// `version_scripts/rrl_env.map`.
macro_rules! abi_fn {
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) -> $ret
        $body
    };
}
