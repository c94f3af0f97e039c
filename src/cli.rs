use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Weekly pair rotation generator.
#[derive(Parser)]
#[command(
    name = "fika-rota",
    version,
    about = "Recency-weighted weekly pair rotation"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate the next rotation from a previous one.
    Generate(GenerateArgs),
    /// Print the roster in recency order with sampling weights.
    Show(ShowArgs),
    /// List the public holidays of a year.
    Holidays(HolidaysArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Previous rotation record file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the new rotation to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First possible slot date (YYYY-MM-DD); today when omitted.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Add a participant (repeatable).
    #[arg(long = "add", value_name = "NAME")]
    pub add: Vec<String>,

    /// Remove a participant (repeatable).
    #[arg(long = "remove", value_name = "NAME")]
    pub remove: Vec<String>,

    /// Participant leaving soon (repeatable).
    #[arg(long = "leaving-soon", value_name = "NAME")]
    pub leaving_soon: Vec<String>,

    /// Participant who just arrived (repeatable).
    #[arg(long = "just-arrived", value_name = "NAME")]
    pub just_arrived: Vec<String>,

    /// Two participants always paired, comma-separated (repeatable).
    #[arg(long = "together", value_name = "A,B")]
    pub together: Vec<String>,

    /// Extra blackout date, YYYY-MM-DD (repeatable).
    #[arg(long = "holiday", value_name = "DATE")]
    pub holiday: Vec<NaiveDate>,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Rotation record file.
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Calendar year.
    #[arg(short, long)]
    pub year: i32,

    /// Holiday region.
    #[arg(short, long, default_value = "SE")]
    pub region: String,
}
