//! Macros for printing status messages to the console.
//!
//! `ok!` and `info!` go to stdout, `warn!` and `error!` go to stderr.
use owo_colors::{Color, OwoColorize};

#[macro_export]
macro_rules! ok {
    ($title:expr, $msg:expr) => {
        $crate::macros::print::<$crate::owo_colors::colors::Green>($title, $msg);
    };
    ($title:expr, $msg:expr, $($arg:tt)*) => {
        $crate::ok!($title, format!($msg, $($arg)*).as_str());
    };
}

#[macro_export]
macro_rules! info {
    ($title:expr, $msg:expr) => {
        $crate::macros::print::<$crate::owo_colors::colors::Cyan>($title, $msg);
    };
    ($title:expr, $msg:expr, $($arg:tt)*) => {
        $crate::info!($title, format!($msg, $($arg)*).as_str());
    };
}

#[macro_export]
macro_rules! warn {
    ($title:expr, $msg:expr) => {
        $crate::macros::eprint::<$crate::owo_colors::colors::Yellow>($title, $msg);
    };
    ($title:expr, $msg:expr, $($arg:tt)*) => {
        $crate::warn!($title, format!($msg, $($arg)*).as_str());
    };
}

#[macro_export]
macro_rules! error {
    ($title:expr, $msg:expr) => {
        $crate::macros::eprint::<$crate::owo_colors::colors::Red>($title, $msg);
    };
    ($title:expr, $msg:expr, $($arg:tt)*) => {
        $crate::error!($title, format!($msg, $($arg)*).as_str());
    };
}

#[doc(hidden)]
pub fn print<C: Color>(title: &str, msg: &str) {
    println!("{:>12} {}", title.fg::<C>().bold(), msg);
}

#[doc(hidden)]
pub fn eprint<C: Color>(title: &str, msg: &str) {
    eprintln!("{:>12} {}", title.fg::<C>().bold(), msg);
}
