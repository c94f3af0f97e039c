use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use fika_rota::io::{load_records, write_records};
use fika_rota::models::RosterHistory;
use fika_rota::scheduler::{RotationSummary, ScheduleBuilder};

use crate::cli::GenerateArgs;
use crate::config::{as_strs, RotaConfig};

/// Run the full generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    // Step 1: Load config and previous rotation
    let config = RotaConfig::load(args.config.as_deref())?;
    info!(path = %args.input.display(), "reading previous rotation");
    let records = load_records(&args.input)
        .with_context(|| format!("failed to read rotation: {}", args.input.display()))?;
    let mut roster = RosterHistory::from_records(&records)
        .with_context(|| format!("invalid rotation: {}", args.input.display()))?;
    info!(
        participants = roster.len(),
        pairings = roster.history().len(),
        "roster loaded"
    );

    // Step 2: Roster changes, config first then command line
    roster.remove_participants(&as_strs(&config.constraints.remove));
    roster.remove_participants(&as_strs(&args.remove));
    roster
        .add_participants(&as_strs(&config.constraints.add))
        .context("failed to add participants from config")?;
    roster
        .add_participants(&as_strs(&args.add))
        .context("failed to add participants")?;

    // Step 3: Constraints
    let mut constraints = config.build_constraints()?;
    constraints.add_leaving_soon_many(&as_strs(&args.leaving_soon))?;
    constraints.add_just_arrived_many(&as_strs(&args.just_arrived))?;
    for pair in &args.together {
        let ids: Vec<&str> = pair.split(',').map(str::trim).collect();
        constraints
            .add_fixed_together(&ids)
            .with_context(|| format!("invalid --together {pair:?}"))?;
    }
    for &date in &args.holiday {
        constraints.add_blackout_date(date);
    }

    // Step 4: Calendar, matcher, RNG
    let calendar = config.build_calendar()?;
    let matcher = config.build_matcher();
    let seed = args.seed.or(config.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // Step 5: Generate
    let builder = ScheduleBuilder::new(roster, constraints, calendar).with_matcher(matcher);
    let schedule = builder
        .generate(args.start, &mut rng)
        .context("failed to generate rotation")?;
    print!("{schedule}");

    let summary = RotationSummary::calculate(&schedule, builder.roster(), builder.constraints());
    info!(
        slots = summary.slot_count,
        solo = summary.solo_slots,
        repeated = summary.repeated_pairings,
        fixed_honored = summary.fixed_pairs_honored,
        fixed_applicable = summary.fixed_pairs_applicable,
        span_weeks = summary.span_weeks,
        "rotation summary"
    );

    // Step 6: Save
    if let Some(output) = &args.output {
        write_records(output, &schedule.to_records())
            .with_context(|| format!("failed to write rotation: {}", output.display()))?;
        info!(path = %output.display(), "rotation written");
    }
    Ok(())
}
