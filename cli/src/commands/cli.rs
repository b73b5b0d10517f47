use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use diffscope_core::api::TaskSpec;

use crate::utils::parse_task_arg;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "diffscope", version, about = "LLM-backed review of code changes")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ReviewArgs {
    /// File holding the new version of the code.
    #[arg(long = "new")]
    pub new_path: PathBuf,

    /// File holding the previous version. Omit for newly added files.
    #[arg(long = "old")]
    pub old_path: Option<PathBuf>,

    /// Path shown to the reviewer. Defaults to `--new`.
    #[arg(long)]
    pub file_path: Option<String>,

    /// Language tag. Inferred from the file extension when omitted.
    #[arg(long)]
    pub language: Option<String>,

    /// Task to run, as NAME=CLASS[:TEMPERATURE]. Can be specified multiple times.
    /// Defaults to the tasks in the config file.
    #[arg(long = "task", value_parser = parse_task_arg, action = clap::ArgAction::Append)]
    pub tasks: Vec<TaskSpec>,

    #[arg(long)]
    pub max_concurrency: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Overrides `http_server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Overrides `http_server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review one code change and print the aggregated findings.
    Review(ReviewArgs),
    /// Serve the review pipeline over HTTP.
    Serve(ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_args() {
        let args = Args::try_parse_from([
            "diffscope",
            "review",
            "--new",
            "src/lib.rs",
            "--task",
            "Security=security:0.1",
            "--task",
            "Quality=quality",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Review(review) = args.command else {
            panic!("expected review subcommand");
        };
        assert_eq!(review.new_path, PathBuf::from("src/lib.rs"));
        assert_eq!(review.tasks.len(), 2);
        assert_eq!(review.tasks[0].temperature, 0.1);
        assert_eq!(review.format, OutputFormat::Json);
    }

    #[test]
    fn test_malformed_task_is_rejected() {
        let res = Args::try_parse_from(["diffscope", "review", "--new", "a.py", "--task", "security"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_parse_serve_args() {
        let args = Args::try_parse_from(["diffscope", "serve", "--port", "9090"]).unwrap();
        let Commands::Serve(serve) = args.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(serve.port, Some(9090));
        assert!(serve.host.is_none());
    }
}
