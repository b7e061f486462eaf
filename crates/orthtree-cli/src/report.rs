// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering of command results as tables or JSON.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::Table;
use orthtree::TreeStats;
use serde::Serialize;

/// Output encoding for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Renders structural tree statistics.
pub fn render_stats(stats: &TreeStats, format: Format) -> Result<String> {
    match format {
        Format::Json => json(stats),
        Format::Table => {
            let mut table = Table::new();
            table.set_header(vec!["metric", "value"]);
            table.add_row(vec!["nodes".to_string(), stats.nodes.to_string()]);
            table.add_row(vec!["leaves".to_string(), stats.leaves.to_string()]);
            table.add_row(vec!["items".to_string(), stats.items.to_string()]);
            table.add_row(vec![
                "max depth reached".to_string(),
                stats.max_depth_reached.to_string(),
            ]);
            table.add_row(vec![
                "max items in a node".to_string(),
                stats.max_items_in_node.to_string(),
            ]);
            Ok(table.to_string())
        }
    }
}

/// Renders a list of candidate item ids.
pub fn render_ids(ids: &[usize], format: Format) -> Result<String> {
    match format {
        Format::Json => json(ids),
        Format::Table => {
            let mut table = Table::new();
            table.set_header(vec!["id"]);
            for id in ids {
                table.add_row(vec![id.to_string()]);
            }
            Ok(table.to_string())
        }
    }
}

/// Renders canonical id pairs.
pub fn render_pairs(pairs: &[(usize, usize)], format: Format) -> Result<String> {
    match format {
        Format::Json => json(pairs),
        Format::Table => {
            let mut table = Table::new();
            table.set_header(vec!["a", "b"]);
            for (a, b) in pairs {
                table.add_row(vec![a.to_string(), b.to_string()]);
            }
            Ok(table.to_string())
        }
    }
}
