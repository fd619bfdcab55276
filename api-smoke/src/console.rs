//! Console report of a smoke run.
//!
//! The report goes to any [`Write`] sink: stdout in the binary, a `Vec<u8>` in tests.

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

/// Width of the `=` divider between sections.
pub const DIVIDER_WIDTH: usize = 50;

pub const PASS: &str = "✅ PASS";
pub const FAIL: &str = "❌ FAIL";

pub const ALL_PASSED: &str = "🎉 All tests passed!";
pub const SOME_FAILED: &str = "⚠️  Some tests failed. Check the output above.";

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: impl Display) -> std::io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn blank(&mut self) -> std::io::Result<()> {
        writeln!(self.out)
    }

    pub fn divider(&mut self) -> std::io::Result<()> {
        self.line(divider())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn divider() -> String {
    "=".repeat(DIVIDER_WIDTH)
}

pub fn status_label(passed: bool) -> &'static str {
    if passed {
        PASS
    } else {
        FAIL
    }
}

/// Two-space indented JSON, falling back to the compact form.
pub fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| compact(value))
}

pub fn compact<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
