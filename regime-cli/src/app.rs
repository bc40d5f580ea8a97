//! Resolves command-line input against the configured defaults and runs the
//! regime calculators.

use std::io::Write;

use anyhow::{Context, Result};
use regime_core::calculations::brackets::validate_statutory_tables;
use regime_core::calculations::{
    ActivityDuration, PresumedProfitCalculator, SimplifiedRegimeInput,
};
use regime_core::{PresumedProfitResult, SimplifiedRegimeError, SimplifiedRegimeResult};
use regime_data::{BracketTableLoader, BracketTableSet};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cli::{ActivityArgs, Command, RevenueArgs};
use crate::config::{DefaultsConfig, SimulatorConfig};
use crate::report::{
    RegimeComparisonReport, blocked_message, render_comparison, render_presumed_profit,
    render_simplified_regime, to_json,
};
use crate::utils::{parse_decimal, parse_optional_decimal, parse_service_percent};

/// Revenue and split after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueInput {
    pub total_revenue: Decimal,
    pub service_percent: i64,
}

/// Runs calculations with a fixed set of defaults and bracket tables.
#[derive(Debug, Clone)]
pub struct Simulator {
    defaults: DefaultsConfig,
    tables: BracketTableSet,
}

impl Simulator {
    pub fn new(
        defaults: DefaultsConfig,
        tables: BracketTableSet,
    ) -> Self {
        Self { defaults, tables }
    }

    /// Builds a simulator from configuration, loading the bracket override
    /// file when one is configured.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        validate_statutory_tables().context("built-in bracket tables are invalid")?;

        let tables = match &config.brackets.file {
            Some(path) => {
                info!(path = %path.display(), "loading bracket tables");
                BracketTableLoader::load_from_file(path)
                    .with_context(|| format!("cannot load bracket tables from {}", path.display()))?
            }
            None => BracketTableSet::default(),
        };

        Ok(Self::new(config.defaults.clone(), tables))
    }

    pub fn revenue_input(
        &self,
        args: &RevenueArgs,
    ) -> Result<RevenueInput> {
        let total_revenue = match args.revenue.as_deref() {
            Some(text) => parse_decimal(text).context("invalid --revenue")?,
            None => self.defaults.revenue,
        };
        let service_percent = args
            .service_percent
            .as_deref()
            .map_or(self.defaults.service_percent, parse_service_percent);

        Ok(RevenueInput {
            total_revenue,
            service_percent,
        })
    }

    pub fn iss_percent(
        &self,
        text: Option<&str>,
    ) -> Result<Decimal> {
        match text {
            Some(text) => parse_decimal(text).context("invalid --iss-percent"),
            None => Ok(self.defaults.iss_percent),
        }
    }

    pub fn simplified_input(
        &self,
        revenue: &RevenueArgs,
        activity: &ActivityArgs,
    ) -> Result<SimplifiedRegimeInput> {
        let RevenueInput {
            total_revenue,
            service_percent,
        } = self.revenue_input(revenue)?;
        let rbt12_input = match activity.accumulated_revenue.as_deref() {
            Some(text) => parse_optional_decimal(text).context("invalid --accumulated-revenue")?,
            None => None,
        };

        Ok(SimplifiedRegimeInput {
            total_revenue,
            service_percent,
            rbt12_input,
            duration: ActivityDuration::from_flag(activity.less_than_12_months, activity.months),
        })
    }

    pub fn presumed_profit(
        &self,
        revenue: &RevenueArgs,
        iss_percent: Option<&str>,
    ) -> Result<PresumedProfitResult> {
        let input = self.revenue_input(revenue)?;
        let iss_percent = self.iss_percent(iss_percent)?;
        debug!(?input, %iss_percent, "running Lucro Presumido");

        Ok(PresumedProfitCalculator::new(iss_percent)
            .calculate(input.total_revenue, input.service_percent))
    }

    pub fn simplified_regime(
        &self,
        input: &SimplifiedRegimeInput,
    ) -> Result<SimplifiedRegimeResult, SimplifiedRegimeError> {
        debug!(?input, "running Simples Nacional");
        self.tables.calculator()?.calculate(input)
    }

    /// Runs `command` and writes its report to `out`.
    ///
    /// A Simples Nacional disqualification fails the `simples` command; in
    /// `comparar` it is reported in place of the Simples Nacional section.
    pub fn run<W: Write>(
        &self,
        command: &Command,
        json: bool,
        out: &mut W,
    ) -> Result<()> {
        let rendered = match command {
            Command::PresumedProfit(args) => {
                let result = self.presumed_profit(&args.revenue, args.iss_percent.as_deref())?;
                if json {
                    to_json(&result)?
                } else {
                    render_presumed_profit(&result)
                }
            }
            Command::SimplifiedRegime(args) => {
                let input = self.simplified_input(&args.revenue, &args.activity)?;
                let result = match self.simplified_regime(&input) {
                    Ok(result) => result,
                    Err(err) => {
                        let message = blocked_message(&err);
                        return Err(anyhow::Error::new(err).context(message));
                    }
                };
                if json {
                    to_json(&result)?
                } else {
                    render_simplified_regime(&result)
                }
            }
            Command::Compare(args) => {
                let presumed = self.presumed_profit(&args.revenue, args.iss_percent.as_deref())?;
                let input = self.simplified_input(&args.revenue, &args.activity)?;
                let simplified = self.simplified_regime(&input);
                if json {
                    to_json(&RegimeComparisonReport {
                        presumed_profit: &presumed,
                        simplified_regime: simplified.as_ref().ok(),
                        simplified_regime_blocked: simplified.as_ref().err().map(blocked_message),
                    })?
                } else {
                    render_comparison(&presumed, simplified.as_ref())
                }
            }
        };

        writeln!(out, "{}", rendered.trim_end()).context("cannot write report")?;
        Ok(())
    }
}
