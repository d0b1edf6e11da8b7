// clic_vectored/src/selftest/console_test.rs

use super::{TestCase, TestResult, TestRunner};
use crate::{console, debug_print, error_print, info_print, println, warn_print};

fn test_format_macros() -> TestResult {
    println!("Testing println macro: {}", "success");
    println!("Numbers: {} {:#x} {:#o}", 42, 0xFF, 0o77);
    TestResult::Pass
}

fn test_level_macros() -> TestResult {
    info_print!("This is an info message from test");
    warn_print!("This is a warning message from test");
    error_print!("This is an error message from test");
    debug_print!("Debug message with line info");
    TestResult::Pass
}

/// Without a sink everything is dropped, so there is nothing to look at.
fn test_sink_installed() -> TestResult {
    if console::has_sink() {
        console::print_str("Console sink is installed\n");
        TestResult::Pass
    } else {
        TestResult::Skip
    }
}

const CONSOLE_TESTS: &[TestCase] = &[
    TestCase {
        name: "format_macros",
        func: test_format_macros,
        description: "print!/println! formatting",
    },
    TestCase {
        name: "level_macros",
        func: test_level_macros,
        description: "tagged info/warn/error/debug lines",
    },
    TestCase {
        name: "sink_installed",
        func: test_sink_installed,
        description: "board output sink",
    },
];

pub fn run_console_tests(runner: &mut TestRunner) {
    runner.run_suite("Console", CONSOLE_TESTS);
}
