use stderrlog::{LogLevelNum, Timestamp};

/// The crate whose records the CLI shows; dependency chatter is filtered out.
const LOG_MODULE: &str = "refprep";

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Log level (-v error, -vv warn, -vvv info, -vvvv debug).
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective level; `default` applies when no `-v` is given.
    pub fn level(
        &self,
        default: u8,
    ) -> LogLevelNum {
        match self.verbose.filter(|&v| v > 0).unwrap_or(default) {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        }
    }

    /// Install the stderr logger for the `refprep` crates.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let timestamp = if self.ts {
            Timestamp::Second
        } else {
            Timestamp::Off
        };

        stderrlog::new()
            .module(LOG_MODULE)
            .quiet(self.quiet)
            .verbosity(self.level(default))
            .timestamp(timestamp)
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[clap(flatten)]
        logging: LogArgs,
    }

    fn parse(args: &[&str]) -> LogArgs {
        TestArgs::parse_from(std::iter::once("refprep").chain(args.iter().copied())).logging
    }

    #[test]
    fn test_default_level() {
        let args = parse(&[]);
        assert!(matches!(args.level(3), LogLevelNum::Info));
        assert!(matches!(args.level(2), LogLevelNum::Warn));
        assert!(!args.quiet);
        assert!(!args.ts);
    }

    #[test]
    fn test_verbose_overrides_default() {
        assert!(matches!(parse(&["-v"]).level(3), LogLevelNum::Error));
        assert!(matches!(parse(&["-vvvv"]).level(2), LogLevelNum::Debug));
        assert!(matches!(parse(&["-vvvvvv"]).level(0), LogLevelNum::Trace));
    }

    #[test]
    fn test_flags() {
        let args = parse(&["-q", "--ts"]);
        assert!(args.quiet);
        assert!(args.ts);
    }
}
