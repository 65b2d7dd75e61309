//! Variadic level macros
//!
//! Each macro takes a console followed by any number of values of mixed
//! types and returns the [`ConsoleResult`](crate::ConsoleResult) of the write.

/// Write mixed values at an explicit level
#[macro_export]
macro_rules! console_write {
    ($console:expr, $level:expr $(, $value:expr)* $(,)?) => {
        $console.write(&[$($crate::LogValue::from($value)),*], $level)
    };
}

/// Write at `log` level
#[macro_export]
macro_rules! log {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Log $(, $value)*)
    };
}

/// Write at `warn` level
#[macro_export]
macro_rules! warn {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Warn $(, $value)*)
    };
}

/// Write at `error` level
#[macro_export]
macro_rules! error {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Error $(, $value)*)
    };
}

/// Write at `debug` level
#[macro_export]
macro_rules! debug {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Debug $(, $value)*)
    };
}

/// Write at `verbose` level
#[macro_export]
macro_rules! verbose {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Verbose $(, $value)*)
    };
}

/// Write at `wtf` level
#[macro_export]
macro_rules! wtf {
    ($console:expr $(, $value:expr)* $(,)?) => {
        $crate::console_write!($console, $crate::Level::Wtf $(, $value)*)
    };
}
