//! Roster Skirmish - headless campaign driver
//!
//! Runs a seeded campaign for a number of weeks: ticks the incident manager,
//! rolls chance incidents, auto-plays every occurrence (first option on
//! choices, full battles on raids) and prints a summary.

use roster_skirmish::abilities::AbilityCatalog;
use roster_skirmish::combat::{CombatOutcome, CombatResolver};
use roster_skirmish::core::error::Result;
use roster_skirmish::core::{GameConfig, MemberId, OccurrenceId, WeekClock};
use roster_skirmish::incident::{
    load_incidents_toml, BasicIncident, BattleState, IconColor, IncidentAction,
    IncidentDefinition, IncidentManager, IncidentNotice, WeeklyChance,
};
use roster_skirmish::roster::{Combatant, Roster};
use roster_skirmish::stats::{BaseStats, IndividualVariance, TrainingPoints};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Headless campaign runner
#[derive(Parser, Debug)]
#[command(name = "roster-skirmish")]
#[command(about = "Run a seeded campaign of weekly incidents and roster battles")]
struct Args {
    /// Weeks to simulate
    #[arg(long, default_value_t = 52)]
    weeks: u32,

    /// Game config TOML (defaults are used when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ability catalog TOML
    #[arg(long, default_value = "data/abilities.toml")]
    abilities: PathBuf,

    /// Scripted incidents TOML
    #[arg(long, default_value = "data/incidents.toml")]
    incidents: PathBuf,

    /// Override the combat seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Weekly chance of a bandit raid
    #[arg(long, default_value_t = 0.1)]
    raid_chance: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Campaign summary
#[derive(Debug, Default, Serialize)]
struct CampaignSummary {
    weeks: u32,
    occurred: u32,
    resolved: u32,
    expired: u32,
    pauses: u32,
    battles: Vec<CombatOutcome>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("roster_skirmish=info")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.combat.seed = seed;
    }
    config.validate()?;

    let abilities = if args.abilities.exists() {
        AbilityCatalog::load_from_toml(&args.abilities)?
    } else {
        tracing::warn!(path = %args.abilities.display(), "Ability file missing; using standard catalog");
        AbilityCatalog::standard()
    };
    tracing::info!(abilities = abilities.len(), "Ability catalog loaded");

    let mut rng = ChaCha8Rng::seed_from_u64(config.combat.seed);
    let player_templates: [Template; 3] = [
        ("Warden", [70, 80, 70, 55], &["heavy_blow", "strike"]),
        ("Scout", [55, 65, 50, 90], &["focus", "strike"]),
        ("Mystic", [60, 75, 55, 70], &["sweep", "strike"]),
    ];
    let bandit_templates: [Template; 2] = [
        ("Bandit", [60, 70, 55, 60], &["strike"]),
        ("Brute", [85, 85, 60, 35], &["heavy_blow", "strike"]),
    ];
    let player = build_roster(&abilities, &mut rng, &player_templates)?;
    let bandits = build_roster(&abilities, &mut rng, &bandit_templates)?;

    let mut manager = IncidentManager::with_config(config.incidents.clone());
    if args.incidents.exists() {
        for incident in load_incidents_toml(&args.incidents)? {
            manager.register_definition(Rc::new(incident));
        }
    } else {
        tracing::warn!(path = %args.incidents.display(), "Incident file missing; no scripted incidents");
    }
    // Expedition members the collapsed-mine script can release
    manager.areas_mut().assign("old_mine", MemberId(1));
    manager.areas_mut().assign("old_mine", MemberId(2));

    let combat = config.combat.clone();
    let raid: Rc<dyn IncidentDefinition> = Rc::new(
        BasicIncident::new("bandit_raid", move || {
            Box::new(BattleState::new(
                "Bandit Raid",
                CombatResolver::from_config(&combat),
                player.clone(),
                bandits.clone(),
            ))
        })
        .with_icon_color(IconColor::Red)
        .with_time_limit(1),
    );
    let mut chance = WeeklyChance::from_config(&config.incidents);
    chance.add(raid, args.raid_chance);

    let mut clock = WeekClock::default();
    let mut summary = CampaignSummary::default();
    let battles = Rc::new(RefCell::new(Vec::new()));

    for _ in 0..args.weeks {
        let Some(date) = clock.advance() else {
            break;
        };
        summary.weeks += 1;

        manager.on_week_tick(date);
        chance.roll(&mut manager, date);

        if manager.wants_pause() {
            clock.pause();
        }
        let ids: Vec<OccurrenceId> = manager.occurrences().map(|o| o.id()).collect();
        for id in ids {
            auto_play(&mut manager, id, &battles);
        }

        for notice in manager.drain_notices() {
            tracing::debug!(week = %date, ?notice, "Incident notice");
            match notice {
                IncidentNotice::Occurred { .. } => summary.occurred += 1,
                IncidentNotice::Resolved { .. } => summary.resolved += 1,
                IncidentNotice::Expired { .. } => summary.expired += 1,
                IncidentNotice::PauseRequested { .. } => summary.pauses += 1,
                _ => {}
            }
        }
        if clock.is_paused() && !manager.wants_pause() {
            clock.resume();
        }
    }

    summary.battles = battles.take();
    tracing::info!(
        weeks = summary.weeks,
        occurred = summary.occurred,
        resolved = summary.resolved,
        battles = summary.battles.len(),
        mine_cleared = manager.areas().assigned("old_mine").is_empty(),
        "Campaign finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Name, stat line (hp, attack, defense, speed), ability loadout
type Template = (&'static str, [u32; 4], &'static [&'static str]);

fn build_roster(
    catalog: &AbilityCatalog,
    rng: &mut ChaCha8Rng,
    templates: &[Template],
) -> Result<Roster> {
    let mut roster = Roster::new();
    for (name, [hp, attack, defense, speed], loadout) in templates {
        let member = Combatant::new(
            BaseStats::new(*name, *hp, *attack, *defense, *speed),
            IndividualVariance::roll(rng),
            TrainingPoints::new(),
            25,
        )
        .with_abilities(catalog.loadout(loadout)?);
        roster.add(member)?;
    }
    Ok(roster)
}

/// Play one occurrence the way an idle player would: fight battles out,
/// take the first option, read every page.
fn auto_play(
    manager: &mut IncidentManager,
    id: OccurrenceId,
    battles: &Rc<RefCell<Vec<CombatOutcome>>>,
) {
    for _ in 0..16 {
        if !manager.is_active(id) {
            return;
        }

        if let Some(battle) = manager.battle_mut(id) {
            if !battle.is_started() {
                let log = Rc::clone(battles);
                battle.start(move |outcome| log.borrow_mut().push(outcome.clone()));
            }
            for _ in 0..64 {
                if manager.step_battle(id).is_some() {
                    break;
                }
            }
            continue;
        }

        let action = match manager.occurrence(id).and_then(|o| o.state().choices().first()) {
            Some(option) => IncidentAction::choose(option.label.clone()),
            None => IncidentAction::Acknowledge,
        };
        manager.apply_action(id, action);
    }
    tracing::warn!(occurrence = %id, "Occurrence still open after auto-play");
}

fn print_summary(summary: &CampaignSummary) {
    println!("\n=== CAMPAIGN SUMMARY ===");
    println!("Weeks simulated:  {}", summary.weeks);
    println!(
        "Incidents:        {} occurred, {} resolved, {} expired",
        summary.occurred, summary.resolved, summary.expired
    );
    println!("Pause requests:   {}", summary.pauses);
    println!("Battles fought:   {}", summary.battles.len());
    for (i, battle) in summary.battles.iter().enumerate() {
        println!(
            "  #{:<2} {:?} in {} rounds{}",
            i + 1,
            battle.status,
            battle.rounds,
            if battle.timed_out { " (time limit)" } else { "" }
        );
    }
}
