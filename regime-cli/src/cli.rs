//! Command-line definition.
//!
//! Numeric flags are taken as text and parsed by [`crate::utils`], so that
//! pt-BR notation such as `--revenue "R$ 1.234,56"` is accepted.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tax simulator for Brazilian small businesses.
///
/// Splits monthly revenue between Serviço and Infoproduto and computes the
/// tax burden under Lucro Presumido and Simples Nacional.
#[derive(Debug, Parser)]
#[command(name = "simulador", version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or `EnvFilter` directive (overrides the config file).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print the result as JSON instead of text tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Lucro Presumido breakdown.
    #[command(name = "presumido", alias = "presumed")]
    PresumedProfit(PresumedProfitArgs),

    /// Simples Nacional breakdown.
    #[command(name = "simples", alias = "simplified")]
    SimplifiedRegime(SimplifiedRegimeArgs),

    /// Both regimes for the same inputs.
    #[command(name = "comparar", alias = "compare")]
    Compare(CompareArgs),
}

/// Revenue and how it is split.
#[derive(Debug, Clone, Default, Args)]
pub struct RevenueArgs {
    /// Revenue for the month (`50000`, `50.000,00`, `R$ 50.000,00`).
    #[arg(long, allow_hyphen_values = true)]
    pub revenue: Option<String>,

    /// Share of revenue invoiced as Serviço, 0 to 100.
    #[arg(long, allow_hyphen_values = true)]
    pub service_percent: Option<String>,
}

/// Activity history used to determine RBT12.
#[derive(Debug, Clone, Args)]
pub struct ActivityArgs {
    /// Revenue accumulated over the last 12 months (or since opening).
    #[arg(long, allow_hyphen_values = true)]
    pub accumulated_revenue: Option<String>,

    /// The business has been active for less than 12 months.
    #[arg(long)]
    pub less_than_12_months: bool,

    /// Months of activity, used with `--less-than-12-months`.
    #[arg(long, default_value_t = 1)]
    pub months: u32,
}

impl Default for ActivityArgs {
    fn default() -> Self {
        Self {
            accumulated_revenue: None,
            less_than_12_months: false,
            months: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct PresumedProfitArgs {
    #[command(flatten)]
    pub revenue: RevenueArgs,

    /// Municipal ISS rate in percent, 2 to 5.
    #[arg(long, allow_hyphen_values = true)]
    pub iss_percent: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SimplifiedRegimeArgs {
    #[command(flatten)]
    pub revenue: RevenueArgs,

    #[command(flatten)]
    pub activity: ActivityArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub revenue: RevenueArgs,

    /// Municipal ISS rate in percent, 2 to 5.
    #[arg(long, allow_hyphen_values = true)]
    pub iss_percent: Option<String>,

    #[command(flatten)]
    pub activity: ActivityArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_presumed_profit_flags() {
        let cli = Cli::try_parse_from([
            "simulador",
            "presumido",
            "--revenue",
            "R$ 50.000,00",
            "--service-percent",
            "77",
            "--iss-percent",
            "3",
        ])
        .unwrap();

        let Command::PresumedProfit(args) = cli.command else {
            panic!("expected presumido, got {:?}", cli.command);
        };
        assert_eq!(args.revenue.revenue.as_deref(), Some("R$ 50.000,00"));
        assert_eq!(args.revenue.service_percent.as_deref(), Some("77"));
        assert_eq!(args.iss_percent.as_deref(), Some("3"));
    }

    #[test]
    fn simplified_regime_defaults_to_one_month() {
        let cli = Cli::try_parse_from(["simulador", "simples", "--less-than-12-months"]).unwrap();

        let Command::SimplifiedRegime(args) = cli.command else {
            panic!("expected simples, got {:?}", cli.command);
        };
        assert!(args.activity.less_than_12_months);
        assert_eq!(args.activity.months, 1);
        assert_eq!(args.activity.accumulated_revenue, None);
    }

    #[test]
    fn english_aliases_are_accepted() {
        for name in ["presumed", "simplified", "compare"] {
            assert!(Cli::try_parse_from(["simulador", name]).is_ok(), "{name}");
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["simulador", "comparar", "--json", "--log-level", "debug"])
            .unwrap();

        assert!(cli.json);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn negative_revenue_is_passed_through() {
        let cli = Cli::try_parse_from(["simulador", "presumido", "--revenue", "-100"]).unwrap();

        let Command::PresumedProfit(args) = cli.command else {
            panic!("expected presumido");
        };
        assert_eq!(args.revenue.revenue.as_deref(), Some("-100"));
    }
}
