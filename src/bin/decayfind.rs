use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use decayfinder::config::Settings;
use decayfinder::descriptor::Descriptor;
use decayfinder::event::load_events;
use decayfinder::facade::Finder;
use decayfinder::parse::parse;
use decayfinder::particles::ParticleTable;
use decayfinder::report::TreeReport;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print the error and end the process with a failure code
macro_rules! unwrap_exit {
  ($e:expr) => {
    match $e {
      Ok(v) => v,
      Err(e) => {
        eprintln!("{e}");
        return ExitCode::FAILURE;
      },
    }
  };
}

/// Search simulated decay trees with decay descriptor patterns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Settings file, defaults to decayfind.toml in the working directory
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Particle table to use instead of the embedded one
  #[arg(short, long, global = true)]
  particles: Option<PathBuf>,
  /// Log more, repeat for even more. RUST_LOG takes precedence.
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Check a pattern and print its canonical form
  Parse {
    pattern: String,
    /// Print the JSON transcription instead
    #[arg(long)]
    json: bool,
    /// Read the pattern as a JSON transcription
    #[arg(long)]
    from_json: bool,
  },
  /// Print every particle in an event file that matches a pattern
  Find {
    pattern: String,
    /// JSON file holding a list of events
    #[arg(short, long)]
    events: PathBuf,
    /// Size of the worker pool
    #[arg(short, long)]
    threads: Option<usize>,
    /// Don't colour the trees
    #[arg(long)]
    no_color: bool,
    /// Only print the number of matches per event
    #[arg(long)]
    count: bool,
  },
  /// List the particle table
  Particles,
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub fn main() -> ExitCode {
  let args = Args::parse();
  init_logging(args.verbose);
  let settings = unwrap_exit!(Settings::discover(args.config.as_deref()));
  let table = match args.particles.as_ref().or(settings.particles.as_ref()) {
    Some(path) => Arc::new(unwrap_exit!(ParticleTable::load(path))),
    None => ParticleTable::shared_builtin(),
  };
  match args.command {
    Commands::Parse { pattern, json, from_json } => {
      let desc = if from_json { Descriptor::from_json(&pattern) } else { parse(&pattern) };
      let desc = unwrap_exit!(desc);
      if json {
        println!("{}", desc.to_json())
      } else {
        println!("{desc}")
      }
    },
    Commands::Find { pattern, events, threads, no_color, count } => {
      if let Some(threads) = threads.or(settings.threads) {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
        unwrap_exit!(pool);
      }
      let finder = unwrap_exit!(Finder::new(&pattern, table));
      let events = unwrap_exit!(load_events(&events));
      let found = finder.find_all(&events);
      info!(
        events = events.len(),
        matched = found.iter().filter(|f| !f.is_empty()).count(),
        "searched for {}",
        finder.descriptor()
      );
      let color = settings.color && !no_color;
      for (n, (event, hits)) in events.iter().zip(&found).enumerate() {
        if count {
          println!("event {n}: {}", hits.len());
          continue;
        }
        for &idx in hits {
          println!("event {n} particle {idx}");
          print!("{}", TreeReport::new(event, finder.db(), idx).color(color));
        }
      }
    },
    Commands::Particles =>
      for entry in table.iter().sorted_by_key(|e| (e.pdg.abs(), e.pdg < 0)) {
        println!("{:>10} {:<14} charge={:+.3} mass={:.6}", entry.pdg, entry.name, entry.charge, entry.mass);
      },
  }
  ExitCode::SUCCESS
}
