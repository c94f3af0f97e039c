use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use fika_rota::holidays;
use fika_rota::io::load_records;
use fika_rota::models::RosterHistory;

use crate::cli::{HolidaysArgs, ShowArgs};

/// Print the roster in recency order with its sampling weights.
pub fn show(args: ShowArgs) -> Result<()> {
    let records = load_records(&args.input)
        .with_context(|| format!("failed to read rotation: {}", args.input.display()))?;
    let roster = RosterHistory::from_records(&records)
        .with_context(|| format!("invalid rotation: {}", args.input.display()))?;

    println!("{:>4}  {:<12}  {:>6}", "Rank", "Name", "Weight");
    for (rank, (name, weight)) in roster.weights().into_iter().enumerate() {
        println!("{:>4}  {:<12}  {:>6.3}", rank + 1, name, weight);
    }
    println!("{} pairings in history", roster.history().len());
    Ok(())
}

/// List the holidays of a year.
pub fn holidays(args: HolidaysArgs) -> Result<()> {
    let calendar = holidays::for_region(&args.region)?;
    let first = NaiveDate::from_ymd_opt(args.year, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("year {} out of range", args.year))?;

    for date in first.iter_days().take_while(|d| d.year() == args.year) {
        if calendar.is_holiday(date) {
            println!("{}  {}", date, date.format("%a"));
        }
    }
    Ok(())
}
