//! Utilities for logging messages from the compiler.

#[doc(hidden)]
#[macro_export]
macro_rules! gss_log {
    (
        $session:expr,
        $($arg:tt)+
    ) => {
        if $session.log_enabled() {
            println!("{}", format_args!($($arg)+));
        }
    };
}
