//! Delve CLI entry point.

use delve_debug::ObservabilityConfig;
use delve_runtime::{Repl, Session, SessionConfig, content, view};
use std::env;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    seed: Option<u64>,
    classes: Vec<String>,
    coop: bool,
    auto_rounds: Option<u64>,
    trace: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--coop" => config.coop = true,
            "--trace" => config.trace = true,
            "--seed" => {
                i += 1;
                let v = value(args, i, "--seed")?;
                config.seed = Some(v.parse().map_err(|_| format!("invalid --seed value: {v}"))?);
            }
            "--class" => {
                i += 1;
                config.classes.push(value(args, i, "--class")?.to_string());
            }
            "--auto" => {
                i += 1;
                let v = value(args, i, "--auto")?;
                config.auto_rounds =
                    Some(v.parse().map_err(|_| format!("invalid --auto value: {v}"))?);
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("delve {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut config = SessionConfig::new().with_seed(seed);
    if !cli.classes.is_empty() {
        config = config.with_classes(cli.classes);
    }
    if cli.coop {
        config = config.coop();
    }
    if cli.trace {
        config = config.with_observability(ObservabilityConfig::debug());
    }

    let mut session = Session::new(config)?;
    println!("seed {seed}, floor fingerprint {:016x}", session.fingerprint()?);

    if let Some(rounds) = cli.auto_rounds {
        for report in session.run_auto(rounds) {
            for line in view::describe_round(session.state(), &report) {
                println!("[{}] {line}", report.round);
            }
        }
        for line in view::status_lines(session.state()) {
            println!("{line}");
        }
        println!("{}", view::render_map(session.state()));
        return Ok(());
    }

    Repl::new(session)?.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mDelve\x1b[0m - Turn-based dungeon crawl

\x1b[1mUSAGE:\x1b[0m
    delve [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    --seed N           Seed the game (default: clock)
    --class NAME       Hero class; give twice with --coop ({})
    --coop             Two heroes taking turns
    --auto N           Let the autopilot play N rounds, then print the result
    --trace            Print every traced event to stderr

Logging follows RUST_LOG (default: warn).",
        content::CLASSES.join(", ")
    );
}
