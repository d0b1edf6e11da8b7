// clic_vectored/src/console.rs

//! Console output.
//!
//! The core never owns a device: the board installs a byte sink once at
//! startup with [`set_sink`]. Until then, and in host tests, output is
//! dropped. The sink is read without locking so a trap handler can print
//! while the foreground was mid-line.

use core::fmt;
use spin::Once;

/// Writes a string to the board's output device.
pub type Sink = fn(&str);

static SINK: Once<Sink> = Once::new();

/// Installs the output sink. Only the first call has any effect.
pub fn set_sink(sink: Sink) {
    SINK.call_once(|| sink);
}

/// Returns `true` once a sink has been installed.
pub fn has_sink() -> bool {
    SINK.get().is_some()
}

/// Severity tag used by the `*_print!` macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    const fn prefix(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m[ERROR] ",
            Level::Warn => "\x1b[33m[WARN] ",
            Level::Info => "\x1b[32m[INFO] ",
            Level::Debug => "\x1b[36m[DEBUG] ",
        }
    }
}

/// Formatted output.
pub fn print(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = Stdout.write_fmt(args);
}

/// Writes one tagged, colour-coded line.
pub fn log(level: Level, args: fmt::Arguments) {
    print_str(level.prefix());
    print(args);
    print_str("\x1b[0m\n");
}

/// Direct string output.
pub fn print_str(s: &str) {
    if let Some(sink) = SINK.get() {
        sink(s);
    }
}

struct Stdout;

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print_str(s);
        Ok(())
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

/// Debug output, tagged with the call site.
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        $crate::console::log(
            $crate::console::Level::Debug,
            format_args!("{}:{}: {}", file!(), line!(), format_args!($($arg)*)),
        )
    };
}

#[macro_export]
macro_rules! error_print {
    ($($arg:tt)*) => {
        $crate::console::log($crate::console::Level::Error, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)*) => {
        $crate::console::log($crate::console::Level::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info_print {
    ($($arg:tt)*) => {
        $crate::console::log($crate::console::Level::Info, format_args!($($arg)*))
    };
}
