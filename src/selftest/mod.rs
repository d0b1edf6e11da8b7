// clic_vectored/src/selftest/mod.rs

//! On-target self-test runner.
//!
//! Runs the interrupt core's checks against a simulated hart so they can be
//! exercised on the board without touching the real controller.

pub mod console_test;

use crate::{error_print, info_print, println, warn_print};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl From<bool> for TestResult {
    fn from(ok: bool) -> Self {
        if ok {
            TestResult::Pass
        } else {
            TestResult::Fail
        }
    }
}

pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
    pub description: &'static str,
}

#[derive(Debug, Default)]
pub struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_test(&mut self, test: &TestCase) -> TestResult {
        self.total += 1;

        println!("Running test: {} - {}", test.name, test.description);

        let result = (test.func)();

        match result {
            TestResult::Pass => {
                self.passed += 1;
                info_print!("  [PASS] {}", test.name);
            }
            TestResult::Fail => {
                self.failed += 1;
                error_print!("  [FAIL] {}", test.name);
            }
            TestResult::Skip => {
                self.skipped += 1;
                warn_print!("  [SKIP] {}", test.name);
            }
        }
        result
    }

    pub fn run_suite(&mut self, suite_name: &str, tests: &[TestCase]) {
        println!("=== {} Test Suite ===", suite_name);

        for test in tests {
            self.run_test(test);
        }

        println!("=== {} Test Suite Complete ===", suite_name);
    }

    pub fn print_summary(&self) {
        println!("=== Test Summary ===");
        println!("Total tests: {}", self.total);
        info_print!("Passed: {}", self.passed);
        if self.failed > 0 {
            error_print!("Failed: {}", self.failed);
        } else {
            info_print!("Failed: {}", self.failed);
        }
        if self.skipped > 0 {
            warn_print!("Skipped: {}", self.skipped);
        }

        let success_rate = if self.total > 0 {
            (self.passed * 100) / self.total
        } else {
            100
        };

        if self.all_passed() {
            info_print!("Success rate: {}% - All tests passed!", success_rate);
        } else {
            warn_print!("Success rate: {}%", success_rate);
        }
        println!("==================");
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total > 0
    }
}

/// Runs every suite and prints a summary. Returns `true` if nothing failed.
pub fn run_all_tests() -> bool {
    let mut runner = TestRunner::new();

    console_test::run_console_tests(&mut runner);
    clic_test::run_clic_tests(&mut runner);

    runner.print_summary();
    runner.all_passed()
}
