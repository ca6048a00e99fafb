//!
//! The benchmark runner executable.
//!

pub(crate) mod arguments;

use std::time::Instant;

use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse_known(std::env::args())
        .map_err(|error| match error.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                error.exit()
            }
            _ => anyhow::anyhow!(error),
        })
        .and_then(main_inner)
    {
        Ok(()) => benchmark_runner::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            benchmark_runner::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if arguments.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let environment = benchmark_runner::Environment::from_process();
    let configuration =
        match benchmark_runner::Configuration::resolve(arguments.into(), &environment) {
            Ok(configuration) => configuration,
            Err(error) => {
                tracing::error!("{error}");
                std::process::exit(benchmark_runner::EXIT_CODE_FAILURE);
            }
        };
    let working_directory = std::env::current_dir()?;
    let server =
        benchmark_runner::ArkoudaServer::from_environment(&environment, working_directory.clone())?;
    let client = benchmark_runner::ScriptClient::from_environment(&environment);

    println!(
        "    {} {} v{} at {}",
        "Starting".bright_green().bold(),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    );
    println!(
        "     {} {} benchmark(s) x {} trial(s) on {} locale(s)",
        "Running".bright_green().bold(),
        configuration.benchmarks.len(),
        configuration.num_trials,
        configuration.num_locales,
    );

    let run_time_start = Instant::now();
    let mut runner = benchmark_runner::Runner::new(configuration, server, client, working_directory)?;
    let outcome = runner.run()?;

    println!(
        "    {} {} run(s) in {}m{:02}s, output written to {:?}",
        "Finished".bright_green().bold(),
        outcome.runs,
        run_time_start.elapsed().as_secs() / 60,
        run_time_start.elapsed().as_secs() % 60,
        outcome.output_path,
    );

    Ok(())
}
