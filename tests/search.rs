use std::path::Path;
use std::sync::Arc;

use decayfinder::event::load_events;
use decayfinder::matcher::{matches, MatchCtx};
use decayfinder::report::TreeReport;
use decayfinder::{Descriptor, Event, Finder, ParticleDb, ParticleTable};

fn demo_events() -> Vec<Event> {
  let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/events.json");
  load_events(&path).unwrap_or_else(|e| panic!("{e}"))
}

fn find_all(pattern: &str) -> Vec<Vec<usize>> {
  let finder = Finder::with_builtin(pattern).unwrap_or_else(|e| panic!("{pattern}: {e}"));
  finder.find_all(&demo_events())
}

#[test]
fn semileptonic_b() {
  assert_eq!(find_all("B0 => D*- [e+, mu+] [nu_e, nu_mu]"), vec![vec![1], vec![1]]);
  assert_eq!(find_all("B0 -> D*- [e+, mu+] [nu_e, nu_mu]"), vec![vec![1], vec![]]);
  assert_eq!(find_all("B0 --> D- pi0 e+ nu_e"), vec![vec![1], vec![]]);
  assert_eq!(find_all("B0 --> X- [e+, mu+] ..."), vec![vec![1], vec![1]]);
}

#[test]
fn hadronic_partner() {
  let pattern = "[(anti-B0 -> K+ pi-), (anti-B0 -> K- pi+)]";
  assert_eq!(find_all(pattern), vec![vec![2], vec![2]]);
  assert_eq!(find_all("Upsilon(4S) -> B0 (anti-B0 -> K+ pi-)"), vec![vec![0], vec![]]);
}

#[test]
fn results_match_individually() {
  let db: Arc<dyn ParticleDb> = ParticleTable::shared_builtin();
  let events = demo_events();
  for pattern in ["X0 -> X+ X- ...", "X- || gamma", "(B0 --> X ...) && X0", "Upsilon(4S) ==> X X X X X X X X X"] {
    let finder = Finder::new(pattern, db.clone()).unwrap();
    for ev in &events {
      let ctx = MatchCtx::new(ev, &*db);
      let expected = (0..ev.particles.len()).filter(|&i| matches(&ctx, i, finder.descriptor())).collect::<Vec<_>>();
      assert_eq!(finder.find(ev), expected, "{pattern}");
    }
  }
}

#[test]
fn json_interop() {
  let finder = Finder::with_builtin("B0 --> X- [e+, mu+] ...").unwrap();
  let json = finder.descriptor().to_json();
  let back = Descriptor::from_json(&json).unwrap();
  assert_eq!(&back, finder.descriptor());
  let db: Arc<dyn ParticleDb> = ParticleTable::shared_builtin();
  assert_eq!(Finder::from_descriptor(back, db).find_all(&demo_events()), vec![vec![1], vec![1]]);
}

#[test]
fn report_of_match() {
  let events = demo_events();
  let text = TreeReport::new(&events[0], ParticleTable::builtin(), 1).color(false).to_string();
  let names = text.lines().map(|l| l.trim_start().split(' ').nth(1).unwrap_or_default()).collect::<Vec<_>>();
  assert_eq!(names, vec!["B0", "D*-", "D-", "pi0", "e+", "nu_e"]);
}
