//! Incident lifecycle integration tests
//!
//! Drives the manager week by week the way a game loop would: scripted
//! definitions from the bundled data file, a chance roller, and a battle
//! occurrence fought through the combat bridge.

use roster_skirmish::abilities::AbilityCatalog;
use roster_skirmish::combat::{CombatResolver, Side};
use roster_skirmish::core::{GameDate, IncidentConfig, MemberId, WeekClock};
use roster_skirmish::exploration::AreaRegistry;
use roster_skirmish::incident::{
    load_incidents_toml, ActionOutcome, BasicIncident, BattleState, IncidentAction,
    IncidentDefinition, IncidentManager, IncidentNotice, TextState, Transition, Urgency,
    WeeklyChance,
};
use roster_skirmish::roster::{Combatant, Roster};
use roster_skirmish::stats::{BaseStats, IndividualVariance, TrainingPoints};
use std::path::Path;
use std::rc::Rc;

fn bundled_incidents() -> Vec<Rc<dyn IncidentDefinition>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/incidents.toml");
    load_incidents_toml(&path)
        .unwrap()
        .into_iter()
        .map(|incident| Rc::new(incident) as Rc<dyn IncidentDefinition>)
        .collect()
}

fn manager_with_bundled() -> IncidentManager {
    let mut manager = IncidentManager::default();
    for definition in bundled_incidents() {
        assert!(manager.register_definition(definition));
    }
    manager
}

fn roster(attack: u32, size: usize) -> Roster {
    let catalog = AbilityCatalog::standard();
    let members = (0..size)
        .map(|i| {
            Combatant::new(
                BaseStats::new(format!("Fighter {}", i), 60, attack, 40, attack),
                IndividualVariance::default(),
                TrainingPoints::new(),
                30,
            )
            .with_abilities(catalog.loadout(&["strike"]).unwrap())
        })
        .collect();
    Roster::with_members(members).unwrap()
}

#[test]
fn test_bundled_scripts_load() {
    let ids: Vec<String> = bundled_incidents()
        .iter()
        .map(|d| d.id().to_string())
        .collect();
    assert!(ids.contains(&"merchant".to_string()));
    assert!(ids.contains(&"collapsed_mine".to_string()));
}

#[test]
fn test_merchant_appears_monthly_and_expires() {
    let mut manager = manager_with_bundled();

    // Y1 M1 W2 is the first monthly trigger
    let report = manager.on_week_tick(GameDate::new(1, 1, 2));
    assert_eq!(report.occurred.len(), 1);
    let id = report.occurred[0];
    assert_eq!(manager.active_for("merchant"), Some(id));

    // time_limit = 2: still open one week later, gone two weeks later
    manager.on_week_tick(GameDate::new(1, 1, 3));
    assert!(manager.is_active(id));
    let report = manager.on_week_tick(GameDate::new(1, 1, 4));
    assert_eq!(report.expired, vec![id]);

    // Next month it shows up again under a fresh id
    let report = manager.on_week_tick(GameDate::new(1, 2, 2));
    assert_eq!(report.occurred.len(), 1);
    assert_ne!(report.occurred[0], id);
}

#[test]
fn test_merchant_trade_walks_to_end() {
    let mut manager = manager_with_bundled();
    let id = manager.on_week_tick(GameDate::new(1, 1, 2)).occurred[0];
    manager.drain_notices();

    assert_eq!(
        manager.apply_action(id, IncidentAction::choose("Trade")),
        ActionOutcome::Updated
    );
    assert_eq!(manager.occurrence(id).unwrap().state().name(), "Trade");
    assert_eq!(
        manager.apply_action(id, IncidentAction::Acknowledge),
        ActionOutcome::Resolved
    );
    assert_eq!(
        manager.drain_notices(),
        vec![
            IncidentNotice::Updated {
                id,
                state: "Trade".into()
            },
            IncidentNotice::Resolved {
                id,
                definition: Some("merchant".into())
            },
        ]
    );
}

#[test]
fn test_mine_collapse_pauses_clock_and_releases_area() {
    let mut manager = manager_with_bundled();
    manager.areas_mut().assign("old_mine", MemberId(1));
    manager.areas_mut().assign("old_mine", MemberId(2));
    manager.areas_mut().assign("forest", MemberId(3));

    let mut clock = WeekClock::default();
    let mut collapse = None;
    while collapse.is_none() {
        let date = clock.advance().unwrap();
        manager.on_week_tick(date);
        collapse = manager.active_for("collapsed_mine");
        assert!(date <= GameDate::new(1, 3, 2));
    }
    let id = collapse.unwrap();

    assert!(manager.wants_pause());
    assert!(manager
        .drain_notices()
        .contains(&IncidentNotice::PauseRequested { id }));
    clock.pause();
    assert!(clock.advance().is_none());

    // Mandatory: it never lapses while the player stalls
    let stalled = clock.date().cumulative_week() + 100;
    manager.on_week_tick(GameDate::from_cumulative_week(stalled));
    assert!(manager.is_active(id));

    manager.apply_action(id, IncidentAction::choose("Seal it"));
    assert!(!manager.is_active(id));
    assert!(manager.areas().assigned("old_mine").is_empty());
    assert_eq!(manager.areas().assigned("forest"), vec![MemberId(3)]);
    assert!(!manager.wants_pause());
    clock.resume();
    assert!(clock.advance().is_some());
}

#[test]
fn test_battle_occurrence_routes_to_victory() {
    let mut manager = IncidentManager::new(
        IncidentConfig::default(),
        Box::new(AreaRegistry::new()),
    );
    let raid = BasicIncident::new("raid", || {
        Box::new(BattleState::new(
            "Raid",
            CombatResolver::seeded(3),
            roster(200, 2),
            roster(10, 2),
        ))
    });
    let id = manager
        .register_direct(Rc::new(raid), None, GameDate::start())
        .unwrap();
    assert_eq!(manager.occurrence(id).unwrap().urgency(), Urgency::Immediate);
    assert!(manager.wants_pause());

    let mut result = None;
    for _ in 0..20 {
        result = manager.step_battle(id);
        if result.is_some() {
            break;
        }
    }
    assert_eq!(result, Some(ActionOutcome::Updated));
    assert_eq!(manager.occurrence(id).unwrap().state().name(), "Victory");
    assert!(manager.battle_mut(id).is_none());
    assert_eq!(
        manager.apply_action(id, IncidentAction::Acknowledge),
        ActionOutcome::Resolved
    );
}

#[test]
fn test_battle_with_custom_router_ends_on_loss() {
    let mut manager = IncidentManager::default();
    let ambush = BasicIncident::new("ambush", || {
        Box::new(
            BattleState::new("Ambush", CombatResolver::seeded(3), roster(10, 1), roster(200, 3))
                .with_router(|outcome| match outcome.status.winner() {
                    Some(Side::A) => Transition::Next(Box::new(TextState::new("Spoils", ""))),
                    _ => Transition::End,
                }),
        )
    });
    let id = manager
        .register_direct(Rc::new(ambush), None, GameDate::start())
        .unwrap();

    let mut result = None;
    while result.is_none() {
        result = manager.step_battle(id);
    }
    assert_eq!(result, Some(ActionOutcome::Resolved));
    assert!(!manager.is_active(id));
}

#[test]
fn test_chance_roller_over_a_year() {
    let mut manager = IncidentManager::default();
    let mut chance = WeeklyChance::from_config(&IncidentConfig::default());
    let storm: Rc<dyn IncidentDefinition> = Rc::new(
        BasicIncident::new("storm", || Box::new(TextState::new("Storm", ""))).with_time_limit(1),
    );
    chance.add(storm, 0.5);

    let mut clock = WeekClock::default();
    let mut occurred = 0;
    for _ in 0..52 {
        let date = clock.advance().unwrap();
        manager.on_week_tick(date);
        occurred += chance.roll(&mut manager, date).len();
        assert!(manager.active_count() <= 1);
    }
    assert!(occurred > 0);
    assert!(occurred <= 52);
}
