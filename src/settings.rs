use crate::Args;
use crate::output::OutputFormat;
use dk_api::time::parse_timezone;
use dk_api::{MillyPolicy, ParserConfig};
use std::path::PathBuf;

/// Run settings: environment defaults with command-line flags on top.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sport: String,
    pub parser: ParserConfig,
    pub policy: MillyPolicy,
    pub format: OutputFormat,
    pub contests_file: Option<PathBuf>,
    pub draftables_file: Option<PathBuf>,
}

impl Settings {
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut parser = ParserConfig::from_env()?;
        if args.strict {
            parser.strict = true;
        }
        if let Some(name) = &args.tz {
            parser.timezone = parse_timezone(name)?;
        }

        Ok(Self {
            sport: args.sport.to_ascii_uppercase(),
            parser,
            policy: args.policy,
            format: args.format,
            contests_file: args.contests_file.clone(),
            draftables_file: args.draftables_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from(["dksalaries", "--sport", "nfl", "--strict", "--tz", "America/Denver"]).unwrap();
        let settings = Settings::load(&args).unwrap();
        assert_eq!(settings.sport, "NFL");
        assert!(settings.parser.strict);
        assert_eq!(settings.parser.timezone, parse_timezone("America/Denver").unwrap());
    }

    #[test]
    fn bad_timezone_is_an_error() {
        let args = Args::try_parse_from(["dksalaries", "--tz", "Mars/Olympus_Mons"]).unwrap();
        assert!(Settings::load(&args).is_err());
    }
}
