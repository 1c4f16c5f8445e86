use crossterm::style::{Color, Stylize};

use bookstore_probe::{
    scenarios::{Outcome, Scenario},
    Result,
};

const COLOR_PASS: Color = Color::Green;
const COLOR_SKIP: Color = Color::Yellow;
const COLOR_FAIL: Color = Color::Red;
const COLOR_DIMMED: Color = Color::DarkGrey;

#[derive(Debug, Default)]
pub struct Report {
    passed:  usize,
    skipped: usize,
    failed:  Vec<String>,
}

impl Report {
    /// Prints one line for the scenario and tallies it.
    pub fn record(&mut self, scenario: &Scenario, outcome: Result<Outcome>) {
        let name = scenario.name();
        match outcome {
            Ok(Outcome::Passed) => {
                self.passed += 1;
                println!("{} {name}", "PASS".with(COLOR_PASS).bold());
            }
            Ok(Outcome::Skipped(reason)) => {
                self.skipped += 1;
                println!(
                    "{} {name} {}",
                    "SKIP".with(COLOR_SKIP).bold(),
                    format!("({reason})").with(COLOR_DIMMED)
                );
            }
            Err(e) => {
                self.failed.push(name.to_string());
                println!("{} {name}", "FAIL".with(COLOR_FAIL).bold());
                println!("     {}", e.to_string().with(COLOR_DIMMED));
            }
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn print_summary(&self, seed: Option<u64>) {
        println!();
        println!(
            "{} passed, {} skipped, {} failed",
            self.passed,
            self.skipped,
            self.failed.len()
        );
        for name in &self.failed {
            println!("  {} {name}", "-".with(COLOR_FAIL));
        }
        if let Some(seed) = seed {
            println!("{}", format!("seed {seed}").with(COLOR_DIMMED));
        }
    }
}
