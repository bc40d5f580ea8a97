//! Text and JSON rendering of calculation results.
//!
//! Text output mirrors the simulator's report: a per-tax table, per-category
//! subtotals and the comparison against an all-service scenario.

use regime_core::{
    PresumedCategoryBreakdown, PresumedProfitResult, PresumedTax, SimplifiedCategoryLine,
    SimplifiedRegimeError, SimplifiedRegimeResult,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_brl, format_number, format_percent, format_rate};

fn tax_label(tax: PresumedTax) -> &'static str {
    match tax {
        PresumedTax::Pis => "PIS 0,65%",
        PresumedTax::Cofins => "COFINS 3%",
        PresumedTax::Irpj => "IRPJ",
        PresumedTax::Csll => "CSLL",
        PresumedTax::Iss => "ISS",
    }
}

/// Both regimes for the same inputs, as emitted by `compare --json`.
#[derive(Debug, Serialize)]
pub struct RegimeComparisonReport<'a> {
    pub presumed_profit: &'a PresumedProfitResult,
    pub simplified_regime: Option<&'a SimplifiedRegimeResult>,

    /// Blocking message when Simples Nacional is unavailable.
    pub simplified_regime_blocked: Option<String>,
}

/// Serializes any result as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Message shown to the user when Simples Nacional cannot be used.
pub fn blocked_message(err: &SimplifiedRegimeError) -> String {
    match err {
        SimplifiedRegimeError::Disqualified { rbt12, ceiling } => format!(
            "Simples Nacional indisponível: RBT12 de {} excede o limite de {}. \
             Utilize o Lucro Presumido.",
            format_brl(*rbt12),
            format_brl(*ceiling)
        ),
        SimplifiedRegimeError::InvalidTable(inner) => {
            format!("Simples Nacional indisponível: tabela de faixas inválida ({inner}).")
        }
    }
}

fn presumed_row(
    label: &str,
    service: &str,
    commerce: &str,
    total: &str,
    percent: &str,
) -> String {
    format!("{label:<12}{service:>16}{commerce:>18}{total:>16}{percent:>18}")
}

pub fn render_presumed_profit(result: &PresumedProfitResult) -> String {
    let split = &result.split;
    let comparison = &result.comparison;

    let mut lines = vec![
        format!(
            "LUCRO PRESUMIDO — faturamento {} (Serviço {}% / Infoproduto {}%, ISS {})",
            format_brl(split.total_revenue),
            split.service_percent,
            split.commerce_percent,
            format_percent(result.iss_percent)
        ),
        String::new(),
        presumed_row(
            "Imposto",
            "Serviço (R$)",
            "Infoproduto (R$)",
            "Total (R$)",
            "% do faturamento",
        ),
    ];

    for line in &result.tax_lines {
        lines.push(presumed_row(
            tax_label(line.tax),
            &format_number(line.service_amount),
            &format_number(line.commerce_amount),
            &format_number(line.total),
            &format_percent(line.revenue_percent),
        ));
    }
    lines.push(presumed_row(
        "Subtotal",
        &format_number(result.service.subtotal),
        &format_number(result.commerce.subtotal),
        &format_number(result.grand_total),
        &format_percent(result.grand_total_percent),
    ));
    lines.push(String::new());

    lines.extend(breakdown_lines(&result.service, split.service_percent));
    lines.extend(breakdown_lines(&result.commerce, split.commerce_percent));
    lines.push(format!("Total geral: {}", format_brl(result.grand_total)));
    lines.push(String::new());

    lines.push("Comparativo — seu cenário vs 100% SERVIÇO".to_string());
    lines.push(format!("  Seu total:     {}", format_brl(result.grand_total)));
    lines.push(format!("  100% Serviço:  {}", format_brl(comparison.scenario_total)));
    lines.push(format!(
        "  Diferença:     {} ({})",
        format_brl(comparison.difference),
        format_percent(comparison.difference_percent)
    ));
    lines.push(String::new());
    lines.extend(breakdown_lines(&comparison.service_scenario, 100));

    join_lines(&lines)
}

fn breakdown_lines(
    breakdown: &PresumedCategoryBreakdown,
    percent: u8,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} — {}%",
        breakdown.category.label().to_uppercase(),
        percent
    )];
    for tax in PresumedTax::ALL {
        if tax == PresumedTax::Iss && breakdown.iss.is_none() {
            continue;
        }
        lines.push(format!(
            "  {:<8}{}",
            format!("{}:", tax.label()),
            format_brl(breakdown.amount(tax))
        ));
    }
    lines.push(format!(
        "  Total {}: {}",
        breakdown.category.label().to_lowercase(),
        format_brl(breakdown.subtotal)
    ));
    lines.push(String::new());
    lines
}

/// Category, annex, bracket, revenue, nominal, deduction, effective, tax.
fn simplified_row(cells: [&str; 8]) -> String {
    let [category, annex, bracket, revenue, nominal, deduction, effective, tax] = cells;
    format!(
        "{category:<13}{annex:>7}{bracket:>7}{revenue:>16}{nominal:>12}{deduction:>16}{effective:>12}{tax:>16}"
    )
}

pub fn render_simplified_regime(result: &SimplifiedRegimeResult) -> String {
    let split = &result.split;

    let mut lines = vec![
        format!(
            "SIMPLES NACIONAL — faturamento {} (Serviço {}% / Infoproduto {}%)",
            format_brl(split.total_revenue),
            split.service_percent,
            split.commerce_percent
        ),
        format!("RBT12: {}", format_brl(result.rbt12)),
        String::new(),
        simplified_row([
            "Categoria",
            "Anexo",
            "Faixa",
            "Receita (R$)",
            "Nominal",
            "Dedução (R$)",
            "Efetiva",
            "Imposto (R$)",
        ]),
        simplified_line(&result.service),
        simplified_line(&result.commerce),
        simplified_row([
            "Total",
            "",
            "",
            &format_number(split.total_revenue),
            "",
            "",
            &format_rate(result.overall_effective_rate),
            &format_number(result.total_tax),
        ]),
        String::new(),
        "Comparativo — 100% SERVIÇO (Anexo III)".to_string(),
        format!(
            "  Alíquota efetiva:      {}",
            format_rate(result.comparison.service_effective_rate)
        ),
        format!(
            "  Imposto 100% Serviço:  {}",
            format_brl(result.comparison.full_service_tax)
        ),
        format!("  Economia:              {}", format_brl(result.economy_amount)),
    ];

    join_lines(&lines)
}

fn simplified_line(line: &SimplifiedCategoryLine) -> String {
    simplified_row([
        line.category.label(),
        line.annex.as_str(),
        &line.bracket_number.to_string(),
        &format_number(line.revenue_share),
        &format_rate(line.nominal_rate),
        &format_number(line.deduction_applied),
        &format_rate(line.effective_rate),
        &format_number(line.tax_amount),
    ])
}

/// Renders both regimes and names the one with the lower tax.
pub fn render_comparison(
    presumed: &PresumedProfitResult,
    simplified: Result<&SimplifiedRegimeResult, &SimplifiedRegimeError>,
) -> String {
    let mut out = render_presumed_profit(presumed);
    out.push('\n');

    match simplified {
        Ok(simplified) => {
            out.push_str(&render_simplified_regime(simplified));
            out.push('\n');
            out.push_str(&cheaper_regime_line(presumed.grand_total, simplified.total_tax));
            out.push('\n');
        }
        Err(err) => {
            out.push_str(&blocked_message(err));
            out.push('\n');
        }
    }

    out
}

/// Joins report lines, each terminated by a newline.
fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn cheaper_regime_line(
    presumed_total: Decimal,
    simplified_total: Decimal,
) -> String {
    let gap = (presumed_total - simplified_total).abs();
    if simplified_total < presumed_total {
        format!("Menor carga: Simples Nacional (diferença de {})", format_brl(gap))
    } else if presumed_total < simplified_total {
        format!("Menor carga: Lucro Presumido (diferença de {})", format_brl(gap))
    } else {
        "Os dois regimes resultam na mesma carga.".to_string()
    }
}
