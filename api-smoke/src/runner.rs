use std::io::Write;

#[cfg(feature = "metrics")]
use metrics::counter;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::checks::Check;
use crate::config::SmokeConfig;
use crate::console::{self, Console};
use crate::{Error, Result, SmokeClient};

/// Process exit status when every check passed.
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit status when at least one check failed or the report broke off.
pub const EXIT_FAILURE: u8 = 1;
/// Process exit status when the run could not start because of bad settings.
pub const EXIT_USAGE: u8 = 2;

/// Outcome flag of each check in a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcomes {
    pub health: bool,
    pub chat: bool,
    pub direct: bool,
}

impl CheckOutcomes {
    pub fn all_passed(&self) -> bool {
        self.health && self.chat && self.direct
    }

    pub fn exit_status(&self) -> u8 {
        if self.all_passed() {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        }
    }

    pub fn get(&self, check: Check) -> bool {
        match check {
            Check::Health => self.health,
            Check::ChatCompletion => self.chat,
            Check::DirectGeneration => self.direct,
        }
    }

    fn set(&mut self, check: Check, passed: bool) {
        match check {
            Check::Health => self.health = passed,
            Check::ChatCompletion => self.chat = passed,
            Check::DirectGeneration => self.direct = passed,
        }
    }
}

/// Runs every check once, in order, then prints the summary.
pub struct SmokeRunner {
    client: SmokeClient,
    config: SmokeConfig,
}

impl SmokeRunner {
    pub fn new(client: SmokeClient, config: SmokeConfig) -> Self {
        Self { client, config }
    }

    /// Runs health, chat completion and direct generation, in that order and
    /// regardless of earlier failures, writing the report to `console`.
    ///
    /// # Errors
    ///
    /// Only fails if the console cannot be written; request failures are
    /// reported as `false` outcomes.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(base_url = %self.config.base_url)))]
    pub async fn run<W: Write>(&self, console: &mut Console<W>) -> Result<CheckOutcomes> {
        console.line("🚀 Starting API tests...")?;
        console.blank()?;

        let mut outcomes = CheckOutcomes::default();
        for (i, check) in Check::ALL.into_iter().enumerate() {
            if i > 0 {
                console.blank()?;
                console.divider()?;
                console.blank()?;
            }
            let passed = check.run(&self.client, &self.config, console).await?;

            #[cfg(feature = "metrics")]
            counter!(
                "api_smoke.checks_total",
                "check" => check.key(),
                "outcome" => if passed { "pass" } else { "fail" }
            )
            .increment(1);

            outcomes.set(check, passed);
        }

        print_summary(console, &outcomes)?;
        console.flush()?;
        Ok(outcomes)
    }
}

/// Maps the result of a whole run to the process exit status.
///
/// A client that cannot be built surfaces as [`Error::Client`] before any
/// check runs; anything else that aborts the run is a plain failure.
pub fn exit_status(run: &Result<CheckOutcomes>) -> u8 {
    match run {
        Ok(outcomes) => outcomes.exit_status(),
        Err(Error::Client(_)) => EXIT_USAGE,
        Err(_) => EXIT_FAILURE,
    }
}

/// Prints one PASS/FAIL line per check and the closing verdict.
pub fn print_summary<W: Write>(console: &mut Console<W>, outcomes: &CheckOutcomes) -> Result<()> {
    console.blank()?;
    console.divider()?;
    console.line("📊 Test Summary:")?;
    for check in Check::ALL {
        console.line(format!(
            "{}: {}",
            check.label(),
            console::status_label(outcomes.get(check))
        ))?;
    }

    console.blank()?;
    if outcomes.all_passed() {
        console.line(console::ALL_PASSED)?;
    } else {
        console.line(console::SOME_FAILED)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcomes: CheckOutcomes) -> String {
        let mut console = Console::new(Vec::new());
        print_summary(&mut console, &outcomes).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn all_passing_ends_with_the_celebration() {
        let text = summary(CheckOutcomes {
            health: true,
            chat: true,
            direct: true,
        });
        assert!(text.contains("Health Check: ✅ PASS\n"));
        assert!(text.contains("Chat Completion: ✅ PASS\n"));
        assert!(text.contains("Direct Ollama: ✅ PASS\n"));
        assert!(text.ends_with("🎉 All tests passed!\n"));
        assert!(!text.contains("Some tests failed"));
    }

    #[test]
    fn a_single_failure_ends_with_the_warning() {
        let text = summary(CheckOutcomes {
            health: true,
            chat: false,
            direct: true,
        });
        assert!(text.contains("Chat Completion: ❌ FAIL\n"));
        assert!(text.ends_with("⚠️  Some tests failed. Check the output above.\n"));
        assert!(!text.contains("All tests passed"));
    }

    #[test]
    fn each_check_gets_exactly_one_label() {
        let text = summary(CheckOutcomes {
            health: false,
            chat: true,
            direct: false,
        });
        for check in Check::ALL {
            let lines = text
                .lines()
                .filter(|line| line.starts_with(check.label()))
                .collect::<Vec<_>>();
            assert_eq!(lines.len(), 1, "{}", check.label());
        }
        assert_eq!(text.matches("PASS").count() + text.matches("FAIL").count(), 3);
    }

    #[test]
    fn exit_status_reflects_outcomes() {
        let all = CheckOutcomes {
            health: true,
            chat: true,
            direct: true,
        };
        let partial = CheckOutcomes {
            chat: false,
            ..all
        };

        assert_eq!(exit_status(&Ok(all)), 0);
        assert_eq!(exit_status(&Ok(partial)), 1);
        assert_eq!(exit_status(&Ok(CheckOutcomes::default())), 1);
    }

    #[test]
    fn exit_status_separates_bad_settings_from_broken_output() {
        let bad_config = Err(Error::Client("Invalid base URL: relative URL without a base".into()));
        assert_eq!(exit_status(&bad_config), EXIT_USAGE);

        let broken_pipe = Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        )));
        assert_eq!(exit_status(&broken_pipe), EXIT_FAILURE);
    }

    #[test]
    fn an_unparsable_base_url_maps_to_the_usage_status() {
        let config = SmokeConfig {
            base_url: "not a url".into(),
            ..SmokeConfig::default()
        };
        let run = config.client().map(|_| CheckOutcomes::default());
        assert_eq!(exit_status(&run), EXIT_USAGE);
    }

    #[test]
    fn all_passed_is_a_logical_and() {
        assert!(!CheckOutcomes::default().all_passed());
        assert!(!CheckOutcomes {
            health: true,
            chat: true,
            direct: false
        }
        .all_passed());
    }
}
