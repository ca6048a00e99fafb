//!
//! The benchmark runner arguments.
//!

use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;

/// The Chapel-style short option for the number of locales.
const NUM_LOCALES_SHORT: &str = "-nl";

/// The long option the Chapel-style short option is translated to.
const NUM_LOCALES_LONG: &str = "--num-locales";

///
/// Runs the Arkouda benchmarks and optionally graphs the results.
///
/// Graphing requires `$CHPL_HOME` to point to a Chapel installation.
/// The server is started and stopped automatically. Unrecognized options are
/// passed to every benchmark client.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Enables the debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of locales to use for the server.
    /// Also accepted as `-nl`.
    #[arg(long)]
    pub num_locales: Option<usize>,

    /// Number of trials to run.
    #[arg(long, default_value_t = 1)]
    pub numtrials: usize,

    /// Basenames of the benchmarks to run, with the extension stripped.
    pub benchmarks: Vec<String>,

    /// Generates graphs, requires `$CHPL_HOME`.
    #[arg(long)]
    pub gen_graphs: bool,

    /// Directory with the `.dat` files.
    #[arg(long)]
    pub dat_dir: Option<PathBuf>,

    /// Directory to place the generated graphs to.
    #[arg(long)]
    pub graph_dir: Option<PathBuf>,

    /// Directory containing the graph infrastructure.
    #[arg(long)]
    pub graph_infra: Option<PathBuf>,

    /// Test platform name.
    #[arg(long, default_value = "")]
    pub platform_name: String,

    /// Description of this configuration.
    #[arg(long, default_value = "")]
    pub description: String,

    /// File containing annotations.
    #[arg(long, default_value = "")]
    pub annotations: String,

    /// Comma-separated list of configurations.
    #[arg(long)]
    pub configs: Option<String>,

    /// Graph start date.
    #[arg(long)]
    pub start_date: Option<String>,

    /// The arguments forwarded to the benchmark clients.
    #[arg(skip)]
    pub client_arguments: Vec<String>,
}

impl Arguments {
    ///
    /// Parses the known arguments, collecting the unknown ones for the clients.
    ///
    pub fn try_parse_known<I>(arguments: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        let (known, unknown) = Self::split(arguments);
        let mut parsed = Self::try_parse_from(known)?;
        parsed.client_arguments = unknown;
        Ok(parsed)
    }

    ///
    /// Splits the command line into the arguments known to the runner and the
    /// rest, preserving the order of both.
    ///
    /// The first argument is the program name. Known options take their value
    /// either inline after `=` or from the next argument. Unknown options are
    /// forwarded alone. Only the first unbroken run of bare words names the
    /// benchmarks; bare words after it are forwarded, so `noop --size 100`
    /// runs `noop` with `--size 100`. Everything after `--` is forwarded.
    ///
    pub fn split<I>(arguments: I) -> (Vec<String>, Vec<String>)
    where
        I: IntoIterator<Item = String>,
    {
        let mut command = Self::command();
        command.build();

        let mut arguments = arguments.into_iter();
        let mut known: Vec<String> = arguments.next().into_iter().collect();
        let mut unknown = Vec::new();
        let mut benchmarks = BenchmarkRun::Pending;

        while let Some(argument) = arguments.next() {
            if argument == "--" {
                unknown.extend(arguments.by_ref());
                break;
            }

            let argument = match argument.strip_prefix(NUM_LOCALES_SHORT) {
                Some(rest) if rest.is_empty() || rest.starts_with('=') => {
                    format!("{NUM_LOCALES_LONG}{rest}")
                }
                _ => argument,
            };

            let definition = if let Some(long) = argument.strip_prefix("--") {
                let name = long.split_once('=').map_or(long, |(name, _)| name);
                command
                    .get_arguments()
                    .find(|definition| definition.get_long() == Some(name))
            } else if let Some(short) = argument.strip_prefix('-') {
                let mut characters = short.chars();
                match (characters.next(), characters.next()) {
                    (Some(character), None) => command
                        .get_arguments()
                        .find(|definition| definition.get_short() == Some(character)),
                    _ => None,
                }
            } else {
                match benchmarks {
                    BenchmarkRun::Pending | BenchmarkRun::Open => {
                        benchmarks = BenchmarkRun::Open;
                        known.push(argument);
                    }
                    BenchmarkRun::Closed => unknown.push(argument),
                }
                continue;
            };
            if benchmarks == BenchmarkRun::Open {
                benchmarks = BenchmarkRun::Closed;
            }

            let Some(definition) = definition else {
                unknown.push(argument);
                continue;
            };
            let takes_value = definition.get_action().takes_values() && !argument.contains('=');
            known.push(argument);
            if takes_value {
                known.extend(arguments.next());
            }
        }

        (known, unknown)
    }
}

///
/// Where the splitter is relative to the run of benchmark names.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BenchmarkRun {
    /// No bare word seen yet.
    Pending,
    /// Inside the run of benchmark names.
    Open,
    /// The run was ended by an option.
    Closed,
}

impl From<Arguments> for benchmark_runner::Options {
    fn from(arguments: Arguments) -> Self {
        Self {
            num_locales: arguments.num_locales,
            num_trials: arguments.numtrials,
            benchmarks: arguments.benchmarks,
            gen_graphs: arguments.gen_graphs,
            dat_dir: arguments.dat_dir,
            graph_dir: arguments.graph_dir,
            graph_infra: arguments.graph_infra,
            platform_name: arguments.platform_name,
            description: arguments.description,
            annotations: arguments.annotations,
            configs: arguments.configs,
            start_date: arguments.start_date,
            client_arguments: arguments.client_arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Arguments;

    fn parse(arguments: &[&str]) -> Arguments {
        Arguments::try_parse_known(
            std::iter::once("benchmark-runner")
                .chain(arguments.iter().copied())
                .map(str::to_owned),
        )
        .expect("Must be parsed")
    }

    #[test]
    fn defaults() {
        let arguments = parse(&[]);
        assert!(!arguments.verbose);
        assert_eq!(arguments.num_locales, None);
        assert_eq!(arguments.numtrials, 1);
        assert!(arguments.benchmarks.is_empty());
        assert!(!arguments.gen_graphs);
        assert_eq!(arguments.platform_name, "");
        assert_eq!(arguments.configs, None);
        assert!(arguments.client_arguments.is_empty());
    }

    #[test]
    fn all_known() {
        let arguments = parse(&[
            "-nl",
            "4",
            "--numtrials=3",
            "stream",
            "IO",
            "--gen-graphs",
            "--dat-dir",
            "/data",
            "--graph-dir=/graphs",
            "--graph-infra",
            "/infra",
            "--platform-name",
            "cray-xc",
            "--description",
            "nightly",
            "--annotations",
            "annotations.yaml",
            "--configs",
            "a,b",
            "--start-date",
            "01/01/20",
        ]);
        assert_eq!(arguments.num_locales, Some(4));
        assert_eq!(arguments.numtrials, 3);
        assert_eq!(arguments.benchmarks, vec!["stream", "IO"]);
        assert!(arguments.gen_graphs);
        assert_eq!(arguments.dat_dir, Some(PathBuf::from("/data")));
        assert_eq!(arguments.graph_dir, Some(PathBuf::from("/graphs")));
        assert_eq!(arguments.graph_infra, Some(PathBuf::from("/infra")));
        assert_eq!(arguments.platform_name, "cray-xc");
        assert_eq!(arguments.description, "nightly");
        assert_eq!(arguments.annotations, "annotations.yaml");
        assert_eq!(arguments.configs.as_deref(), Some("a,b"));
        assert_eq!(arguments.start_date.as_deref(), Some("01/01/20"));
        assert!(arguments.client_arguments.is_empty());
    }

    #[test]
    fn unknown_forwarded_in_order() {
        let arguments = parse(&[
            "--size=100000",
            "noop",
            "-x",
            "--numtrials",
            "2",
            "--correctness-only",
            "--",
            "--dtype",
            "float64",
        ]);
        assert_eq!(arguments.benchmarks, vec!["noop"]);
        assert_eq!(arguments.numtrials, 2);
        assert_eq!(
            arguments.client_arguments,
            vec![
                "--size=100000",
                "-x",
                "--correctness-only",
                "--dtype",
                "float64"
            ]
        );
    }

    #[test]
    fn bare_words_after_an_option_forwarded() {
        let arguments = parse(&["noop", "--size", "100"]);
        assert_eq!(arguments.benchmarks, vec!["noop"]);
        assert_eq!(arguments.client_arguments, vec!["--size", "100"]);
    }

    #[test]
    fn bare_words_after_a_known_flag_forwarded() {
        let arguments = parse(&["noop", "--gen-graphs", "stream"]);
        assert_eq!(arguments.benchmarks, vec!["noop"]);
        assert!(arguments.gen_graphs);
        assert_eq!(arguments.client_arguments, vec!["stream"]);
    }

    #[test]
    fn benchmarks_after_leading_options() {
        let arguments = parse(&[
            "--gen-graphs",
            "--dat-dir",
            "/data",
            "stream",
            "IO",
            "-x",
            "5",
        ]);
        assert_eq!(arguments.benchmarks, vec!["stream", "IO"]);
        assert_eq!(arguments.dat_dir, Some(PathBuf::from("/data")));
        assert_eq!(arguments.client_arguments, vec!["-x", "5"]);
    }

    #[test]
    fn num_locales_inline() {
        assert_eq!(parse(&["-nl=8"]).num_locales, Some(8));
        assert_eq!(parse(&["--num-locales", "2"]).num_locales, Some(2));
    }

    #[test]
    fn short_verbose() {
        assert!(parse(&["-v"]).verbose);
    }

    #[test]
    fn invalid_trials() {
        let result = Arguments::try_parse_known(
            ["benchmark-runner", "--numtrials", "many"]
                .into_iter()
                .map(str::to_owned),
        );
        assert!(result.is_err());
    }

    #[test]
    fn into_options() {
        let options: benchmark_runner::Options = parse(&["noop", "--trials=5"]).into();
        assert_eq!(options.benchmarks, vec!["noop"]);
        assert_eq!(options.num_trials, 1);
        assert_eq!(options.client_arguments, vec!["--trials=5"]);
    }
}
