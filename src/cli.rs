use clap::{ArgAction, Parser};

use crate::constants::CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "roommate-matcher",
    about = "Match roommate seekers to candidates from a conversation",
    long_about = "Extracts lifestyle preferences from free-text messages and ranks roommate \
                  and listing candidates against them, one conversation thread at a time. \
                  You must specify either --server mode or provide a --query.",
    version
)]
pub struct Args {
    /// The message to match
    #[arg(
        short,
        long,
        help = "A message describing the roommate you are looking for",
        required_unless_present = "server"
    )]
    pub query: Option<String>,

    #[arg(
        short,
        long,
        help = "Path to the YAML configuration file",
        default_value = CONFIG_PATH
    )]
    pub config: String,

    #[arg(long, help = "Continue an existing conversation thread")]
    pub thread: Option<String>,

    #[arg(long, help = "Maximum number of results to return")]
    pub top_k: Option<usize>,

    #[arg(
        long,
        help = "Identity the query runs as",
        default_value = "local"
    )]
    pub user: String,

    /// Enable debug output
    #[arg(
        long,
        help = "Enable debug logging",
        action = ArgAction::SetTrue
    )]
    pub debug: bool,

    /// Run in server mode
    #[arg(
        long,
        help = "Run as a gRPC server instead of CLI mode",
        conflicts_with = "query",
        action = ArgAction::SetTrue
    )]
    pub server: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        let args = Args::try_parse_from(["roommate-matcher", "--server"]).unwrap();
        assert!(args.server);
        assert_eq!(args.config, CONFIG_PATH);

        let args = Args::try_parse_from([
            "roommate-matcher",
            "-q",
            "quiet and clean",
            "--thread",
            "t1",
            "--top-k",
            "2",
        ])
        .unwrap();
        assert_eq!(args.query.as_deref(), Some("quiet and clean"));
        assert_eq!(args.thread.as_deref(), Some("t1"));
        assert_eq!(args.top_k, Some(2));
        assert_eq!(args.user, "local");

        assert!(Args::try_parse_from(["roommate-matcher"]).is_err());
        assert!(Args::try_parse_from(["roommate-matcher", "--server", "-q", "x"]).is_err());
    }
}
