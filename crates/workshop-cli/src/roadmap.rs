//! # Roadmap Subcommand
//!
//! Prints the steps in presentation order with running minute totals, and
//! compares the total with the session length. The configuration exposes
//! no aggregates, so the sums are computed here.

use anyhow::Result;
use clap::Args;

use workshop_core::WorkshopConfig;

/// Arguments for the `workshop roadmap` subcommand.
#[derive(Args, Debug)]
pub struct RoadmapArgs {}

/// One printed line of the roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapRow<'a> {
    pub position: usize,
    pub id: &'a str,
    pub tag: &'a str,
    pub title: &'a str,
    pub minutes: u32,
    /// Minutes elapsed at the end of this step.
    pub cumulative: u64,
}

/// Lay out the roadmap rows in presentation order.
pub fn rows(config: &WorkshopConfig) -> Vec<RoadmapRow<'_>> {
    let mut cumulative = 0u64;
    config
        .steps
        .iter()
        .enumerate()
        .map(|(position, step)| {
            cumulative += u64::from(step.duration_min);
            RoadmapRow {
                position,
                id: step.id.as_str(),
                tag: step.tag.as_str(),
                title: &step.title,
                minutes: step.duration_min,
                cumulative,
            }
        })
        .collect()
}

/// Execute the roadmap subcommand.
pub fn run_roadmap(_args: &RoadmapArgs, config: &WorkshopConfig) -> Result<u8> {
    let rows = rows(config);
    let id_width = rows.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);
    let tag_width = rows.iter().map(|r| r.tag.len()).max().unwrap_or(3).max(3);

    println!("{} — {} ({})", config.title, config.date, config.place);
    println!(
        "{:>2}  {:<id_width$}  {:<tag_width$}  {:>4}  {:>5}  TITLE",
        "#", "ID", "TAG", "MIN", "AT"
    );
    for row in &rows {
        println!(
            "{:>2}  {:<id_width$}  {:<tag_width$}  {:>4}  {:>5}  {}",
            row.position, row.id, row.tag, row.minutes, row.cumulative, row.title
        );
    }

    let total = rows.last().map_or(0, |r| r.cumulative);
    let available = config.duration_hours * 60.0;
    println!("Total: {total} min of {available} min");
    if total as f64 > available {
        println!("WARN: roadmap exceeds the session by {} min", total as f64 - available);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_accumulate_in_order() {
        let config = WorkshopConfig::builtin().unwrap();
        let rows = rows(&config);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].id, "step0-setup");
        assert_eq!(rows[0].cumulative, 10);
        assert_eq!(rows[1].cumulative, 15);
        assert_eq!(rows[4].id, "step4-marker-tracking");
        assert_eq!(rows[4].cumulative, 65);
        assert_eq!(rows[8].cumulative, 110);
    }

    #[test]
    fn empty_roadmap_has_no_rows() {
        let mut config = WorkshopConfig::builtin().unwrap();
        config.steps.clear();
        assert!(rows(&config).is_empty());
        assert_eq!(run_roadmap(&RoadmapArgs {}, &config).unwrap(), 0);
    }
}
