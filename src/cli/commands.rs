use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// MicroProfile project generator
#[derive(Parser, Debug)]
#[command(
    name = "starterkit",
    about = "Generate MicroProfile project skeletons for a chosen runtime",
    version,
    author,
    long_about = "starterkit renders the source tree and Maven build descriptor of a \
                  MicroProfile project for a runtime such as Quarkus, enabling only the \
                  files and dependencies the selected specifications need."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        ignore_case = true,
        help = "Set logging level"
    )]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a project from a request file",
        long_about = "Reads a YAML or JSON request naming the server, MicroProfile version, \
                      specifications and topology, then writes the project files and a \
                      pom.xml for every generated project.\n\n\
                      Examples:\n  \
                      starterkit generate request.yaml\n  \
                      starterkit generate request.json --output /tmp/shop\n  \
                      starterkit generate request.yaml --pom baseline-pom.xml --force"
    )]
    Generate(GenerateArgs),

    #[command(about = "List supported servers, specifications and versions")]
    List(ListArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(value_name = "REQUEST", help = "Request file (.yaml, .yml or .json)")]
    pub request: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory (defaults to STARTERKIT_OUTPUT_DIR or the current directory)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Baseline pom.xml to adapt instead of the built-in one"
    )]
    pub pom: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory of *.jinja templates replacing the embedded ones"
    )]
    pub templates: Option<PathBuf>,

    #[arg(long, help = "Generate even if the output directory is not empty")]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Human,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let args = CliArgs::parse_from(["starterkit", "generate", "request.yaml"]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.request, PathBuf::from("request.yaml"));
                assert!(generate.output.is_none());
                assert!(generate.pom.is_none());
                assert!(generate.templates.is_none());
                assert!(!generate.force);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = CliArgs::parse_from([
            "starterkit",
            "generate",
            "request.json",
            "-o",
            "/tmp/out",
            "--pom",
            "pom.xml",
            "--force",
            "-v",
        ]);
        assert!(args.verbose);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.output, Some(PathBuf::from("/tmp/out")));
                assert_eq!(generate.pom, Some(PathBuf::from("pom.xml")));
                assert!(generate.force);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_request() {
        assert!(CliArgs::try_parse_from(["starterkit", "generate"]).is_err());
    }

    #[test]
    fn test_list_format() {
        let args = CliArgs::parse_from(["starterkit", "list", "--format", "json"]);
        match args.command {
            Commands::List(list) => assert_eq!(list.format, ListFormat::Json),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_log_level_values() {
        let args = CliArgs::parse_from(["starterkit", "--log-level", "debug", "list"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        assert!(CliArgs::try_parse_from(["starterkit", "--log-level", "foo", "list"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["starterkit", "-q", "-v", "list"]).is_err());
    }
}
