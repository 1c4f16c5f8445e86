use std::{path::PathBuf, process::exit};

use anyhow::{Context as _, Result};
use clap::ArgMatches;
use tracing::{error, Level};

use bookstore_probe::{
    config::Settings,
    random::Generator,
    scenarios::{self, Context, ResourceKind, Scenario},
};

mod command_parser;
mod report;

use report::Report;

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn config_dir(matches: &ArgMatches) -> PathBuf {
    let dir = matches
        .get_one::<String>("config-dir")
        .map(String::as_str)
        .unwrap_or(".");
    shellexpand::path::tilde(std::path::Path::new(dir)).into_owned()
}

fn resource_filter(matches: &ArgMatches) -> Result<Option<ResourceKind>> {
    Ok(match matches.get_one::<String>("resource") {
        Some(resource) => Some(resource.parse()?),
        None => None,
    })
}

fn selected(
    gen: &mut Generator,
    resource: Option<ResourceKind>,
    filter: Option<&str>,
) -> Result<Vec<Scenario>> {
    let filter = filter.map(str::to_lowercase);
    Ok(scenarios::catalog(gen)?
        .into_iter()
        .filter(|s| resource.map_or(true, |r| s.resource() == r))
        .filter(|s| {
            filter
                .as_deref()
                .map_or(true, |f| s.name().to_lowercase().contains(f))
        })
        .collect())
}

async fn run(settings: Settings, matches: &ArgMatches) -> Result<bool> {
    let mut gen = match matches.get_one::<u64>("seed") {
        Some(seed) => Generator::seeded(*seed),
        None => Generator::new(),
    };
    let scenarios = selected(
        &mut gen,
        resource_filter(matches)?,
        matches.get_one::<String>("filter").map(String::as_str),
    )?;
    if scenarios.is_empty() {
        anyhow::bail!("No scenario matches the given filters");
    }

    let mut ctx = Context::new(settings, gen).context("Invalid API configuration")?;
    let mut report = Report::default();
    for scenario in &scenarios {
        let outcome = scenario.run(&mut ctx).await;
        if let Err(e) = &outcome {
            error!(scenario = scenario.name(), "{e}");
        }
        report.record(scenario, outcome);
    }
    report.print_summary(ctx.gen.seed());
    Ok(report.all_passed())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command_parser::arg_parser().get_matches();
    init_tracing(matches.get_count("verbose"));

    let dir = config_dir(&matches);
    let settings = Settings::read_from(&dir)
        .with_context(|| format!("Failed to read configuration from {}", dir.display()))?;

    match matches.subcommand() {
        Some(("run", matches)) => {
            if !run(settings, matches).await? {
                exit(1);
            }
        }
        Some(("list", matches)) => {
            let mut gen = Generator::new();
            for scenario in selected(&mut gen, resource_filter(matches)?, None)? {
                println!("{}\t{}", scenario.resource(), scenario.name());
            }
        }
        Some(("config", matches)) => {
            if matches.get_flag("template") {
                print!("{}", Settings::default_as_string()?);
            } else {
                print!("{}", toml::to_string(&settings.api()?)?);
            }
        }
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}
