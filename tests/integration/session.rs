//! Sessions played by the autopilot.

use delve_debug::ObservabilityConfig;
use delve_runtime::serialize::{level_fingerprint, level_from_bytes, level_to_bytes};
use delve_runtime::{Session, SessionConfig, view};
use delve_storage::Health;

#[test]
fn seeds_replay_whole_games() {
    let play = |seed| {
        let mut session = Session::new(SessionConfig::new().with_seed(seed).coop()).unwrap();
        let reports = session.run_auto(60);
        let lines: Vec<String> = reports
            .iter()
            .flat_map(|r| view::describe_round(session.state(), r))
            .collect();
        (lines, session.state().floor(), session.fingerprint().unwrap())
    };
    assert_eq!(play(1234), play(1234));
}

#[test]
fn autopilot_stops_when_heroes_fall() {
    let mut session = Session::new(SessionConfig::new().with_seed(5)).unwrap();
    let hero = session.state().actors()[0];
    if let Some(h) = session.state_mut().store_mut().get_mut::<Health>(hero) {
        h.current = 0;
    }
    assert!(session.state().is_over());
    assert!(session.run_auto(10).is_empty());
}

#[test]
fn every_round_is_traced() {
    let config = SessionConfig::new()
        .with_seed(99)
        .with_classes(["rogue", "templar"])
        .coop()
        .with_observability(ObservabilityConfig::enabled());
    let mut session = Session::new(config).unwrap();
    let reports = session.run_auto(15);
    let starts = session.tracer().buffer().by_event_type("round-start").len();
    assert_eq!(starts, reports.len());
    assert!(!session.tracer().format_recent(5).is_empty());
}

#[test]
fn levels_survive_encoding() {
    let session = Session::new(SessionConfig::new().with_seed(8)).unwrap();
    let level = session.state().level();
    let decoded = level_from_bytes(&level_to_bytes(level).unwrap()).unwrap();
    assert_eq!(&decoded, level);
    assert_eq!(level_fingerprint(&decoded).unwrap(), session.fingerprint().unwrap());
}

#[test]
fn different_seeds_give_different_floors() {
    let a = Session::new(SessionConfig::new().with_seed(1)).unwrap();
    let b = Session::new(SessionConfig::new().with_seed(2)).unwrap();
    assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}

#[test]
fn status_lists_every_hero() {
    let config = SessionConfig::new().with_classes(["warrior", "rogue"]).coop();
    let session = Session::new(config).unwrap();
    let lines = view::status_lines(session.state()).join("\n");
    assert!(lines.contains("Warrior"));
    assert!(lines.contains("Rogue"));
    assert!(view::render_map(session.state()).contains('@'));
}
