use crate::config::{Overrides, DEFAULT_CONFIG_PATH};
use clap::{Args, Parser, Subcommand};
use loanwise_core::{ApplicantRecord, Education, Field, Flag};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loanwise")]
#[command(author, version, about = "Personal loan eligibility predictor")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Model artifact path
    #[arg(short, long, global = true, env = "LOANWISE_MODEL_PATH")]
    pub model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web form
    Serve {
        /// Listen address
        #[arg(short, long)]
        address: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// YAML rule set replacing the built-in reasons
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Check one applicant from the command line
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Age in years
    #[arg(long, default_value_t = 35, value_parser = clap::value_parser!(u32).range(18..=100))]
    pub age: u32,

    /// Work experience in years
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=60))]
    pub experience: u32,

    /// Monthly income, in thousands
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(0..=500))]
    pub income: u32,

    /// Family size
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub family: u32,

    /// Average monthly credit card spend, in thousands
    #[arg(long, default_value_t = 2.0, value_parser = parse_cc_avg)]
    pub cc_avg: f64,

    /// Education level: 1 undergraduate, 2 graduate, 3 advanced/professional
    #[arg(long, default_value = "1", value_parser = parse_education)]
    pub education: Education,

    /// Mortgage, in thousands
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=1000))]
    pub mortgage: u32,

    /// Has a securities account (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_flag)]
    pub securities_account: Flag,

    /// Has a certificate of deposit account (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_flag)]
    pub cd_account: Flag,

    /// Uses online banking (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_flag)]
    pub online: Flag,

    /// Has a credit card (yes/no)
    #[arg(long, default_value = "no", value_parser = parse_flag)]
    pub credit_card: Flag,

    /// YAML rule set replacing the built-in reasons
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Print the assessment as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn record(&self) -> ApplicantRecord {
        ApplicantRecord {
            age: self.age,
            experience: self.experience,
            income: self.income,
            family: self.family,
            cc_avg: self.cc_avg,
            education: self.education,
            mortgage: self.mortgage,
            securities_account: self.securities_account,
            cd_account: self.cd_account,
            online: self.online,
            credit_card: self.credit_card,
        }
    }
}

impl Cli {
    /// Command-line values that override the configuration file
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            model_path: self.model.clone(),
            ..Default::default()
        };
        match &self.command {
            Commands::Serve {
                address,
                port,
                rules,
            } => {
                overrides.address = address.clone();
                overrides.port = *port;
                overrides.rules_path = rules.clone();
            }
            Commands::Check(args) => {
                overrides.rules_path = args.rules.clone();
            }
        }
        overrides
    }
}

fn parse_cc_avg(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("invalid number: {}", s))?;
    let range = Field::CcAvg.range();
    if range.contains(value) {
        Ok(value)
    } else {
        Err(format!(
            "{} is not in {}..={}",
            value, range.min, range.max
        ))
    }
}

fn parse_education(s: &str) -> Result<Education, String> {
    s.trim()
        .parse::<u8>()
        .ok()
        .and_then(Education::from_ordinal)
        .ok_or_else(|| format!("education must be 1, 2 or 3 (got {})", s))
}

fn parse_flag(s: &str) -> Result<Flag, String> {
    Flag::parse(s).ok_or_else(|| format!("expected yes or no (got {})", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["loanwise", "check"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        let record = args.record();
        let default = ApplicantRecord::default();
        assert_eq!(record.age, default.age);
        assert_eq!(record.income, default.income);
        assert_eq!(record.cc_avg, default.cc_avg);
        assert_eq!(record.education, default.education);
        assert_eq!(record.online, default.online);
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "loanwise",
            "check",
            "--income",
            "120",
            "--cc-avg",
            "3.5",
            "--education",
            "3",
            "--cd-account",
            "yes",
            "--online",
            "Yes",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        let record = args.record();
        assert_eq!(record.income, 120);
        assert_eq!(record.cc_avg, 3.5);
        assert_eq!(record.education, Education::Advanced);
        assert_eq!(record.cd_account, Flag::Yes);
        assert_eq!(record.online, Flag::Yes);
        assert_eq!(record.credit_card, Flag::No);
    }

    #[test]
    fn test_check_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["loanwise", "check", "--age", "12"]).is_err());
        assert!(Cli::try_parse_from(["loanwise", "check", "--family", "5"]).is_err());
        assert!(Cli::try_parse_from(["loanwise", "check", "--cc-avg", "-1"]).is_err());
        assert!(Cli::try_parse_from(["loanwise", "check", "--education", "4"]).is_err());
        assert!(Cli::try_parse_from(["loanwise", "check", "--online", "maybe"]).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "loanwise",
            "serve",
            "--port",
            "9000",
            "--model",
            "m.yaml",
            "--rules",
            "r.yaml",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.model_path, Some(PathBuf::from("m.yaml")));
        assert_eq!(overrides.rules_path, Some(PathBuf::from("r.yaml")));
        assert!(overrides.address.is_none());
    }
}
