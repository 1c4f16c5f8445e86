use clap::{value_parser, Arg, ArgAction, Command};

fn resource_arg() -> Arg {
    Arg::new("resource")
        .long("resource")
        .short('r')
        .help("Only scenarios for this resource")
        .value_parser(["authors", "books"])
}

pub fn arg_parser() -> Command {
    Command::new("bookstore-probe")
        .about("Runs the bookstore API scenarios against a live endpoint")
        .subcommand_required(true)
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .short('c')
                .global(true)
                .help("Directory holding appSettings.json and resources/data")
                .default_value("."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Raise the log level (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("run")
                .about("Run the scenario catalog")
                .arg(resource_arg())
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .help("Only scenarios whose name contains this text"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the random fixtures"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Print scenario names")
                .arg(resource_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the resolved API configuration")
                .arg(
                    Arg::new("template")
                        .long("template")
                        .action(ArgAction::SetTrue)
                        .help("Print the built-in defaults instead"),
                ),
        )
}
