use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    billing::PeakSummary,
    core::transfer::Transfer,
    metrics::Metrics,
    quantity::{Zero, currency::Kronor},
    redistribution::AlgorithmKind,
    strategy::Registry,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn savings_cell(savings: Option<Kronor>) -> Cell {
    match savings {
        Some(savings) => Cell::new(savings).set_alignment(CellAlignment::Right).fg(
            if savings > Kronor::ZERO {
                Color::Green
            } else if savings < Kronor::ZERO {
                Color::Red
            } else {
                Color::Reset
            },
        ),
        None => Cell::new("–").add_attribute(Attribute::Dim),
    }
}

fn peaks_cell(summary: &PeakSummary) -> Cell {
    Cell::new(summary.top.iter().join(", ")).set_alignment(CellAlignment::Right)
}

#[must_use]
pub fn build_metrics_table(metrics: &Metrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Before", "After"]);
    table.add_row(vec![
        Cell::new("Total usage"),
        Cell::new(metrics.total_usage).set_alignment(CellAlignment::Right),
        Cell::new(metrics.total_usage).set_alignment(CellAlignment::Right),
    ]);
    let original = metrics.original.as_ref();
    table.add_row(vec![
        Cell::new("Top peaks"),
        original.map_or_else(|| Cell::new(""), peaks_cell),
        peaks_cell(&metrics.optimized),
    ]);
    table.add_row(vec![
        Cell::new("Average"),
        Cell::new(original.map(|original| original.average.to_string()).unwrap_or_default())
            .set_alignment(CellAlignment::Right),
        Cell::new(metrics.optimized.average).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Fee"),
        Cell::new(original.map(|original| original.fee.to_string()).unwrap_or_default())
            .set_alignment(CellAlignment::Right),
        Cell::new(metrics.optimized.fee).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Rate").add_attribute(Attribute::Dim),
        Cell::new(metrics.rate).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        Cell::new(metrics.rate).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![Cell::new("Savings"), Cell::new(""), savings_cell(metrics.savings())]);
    table
}

#[must_use]
pub fn build_transfers_table(transfers: &[Transfer]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["From", "To", "Amount"]);
    for transfer in transfers {
        table.add_row(vec![
            Cell::new(transfer.from.format("%Y-%m-%d %H:%M")),
            Cell::new(transfer.to.format("%Y-%m-%d %H:%M")),
            Cell::new(transfer.amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_comparison_table(rows: &[(AlgorithmKind, Metrics)]) -> Table {
    let best_fee = rows.iter().map(|(_, metrics)| metrics.optimized.fee).min();

    let mut table = new_table();
    table.set_header(vec!["Algorithm", "Top peaks", "Average", "Fee", "Savings", "Transfers"]);
    for (kind, metrics) in rows {
        table.add_row(vec![
            Cell::new(kind),
            peaks_cell(&metrics.optimized),
            Cell::new(metrics.optimized.average).set_alignment(CellAlignment::Right),
            Cell::new(metrics.optimized.fee).set_alignment(CellAlignment::Right).add_attribute(
                if Some(metrics.optimized.fee) == best_fee {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                },
            ),
            savings_cell(metrics.savings()),
            Cell::new(metrics.transfers.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_providers_table(registry: &Registry) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Rule", "Rate", "Night hours", "Guidance"]);
    for strategy in registry.iter() {
        let mut guidance = strategy.guidance_text().iter().map(|tip| format!("• {tip}")).join("\n");
        if let Some(information) = strategy.additional_information {
            guidance.push_str("\n\n");
            guidance.push_str(information);
        }
        table.add_row(vec![
            Cell::new(strategy.id).add_attribute(Attribute::Bold),
            Cell::new(strategy.name),
            Cell::new(&strategy.rule),
            Cell::new(strategy.rule.rate()).set_alignment(CellAlignment::Right),
            Cell::new(strategy.night_hours().map(|hours| hours.to_string()).unwrap_or_default())
                .add_attribute(Attribute::Dim),
            Cell::new(guidance),
        ]);
    }
    table
}
