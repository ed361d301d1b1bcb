#![warn(missing_docs)]
//! Decay descriptors are a small pattern language over particle decay trees,
//! such as `B0 --> X- [e+, mu+] [nu_e, nu_mu] ...` for "a B0 that eventually
//! produces a negative particle, a positron or antimuon and the matching
//! neutrino, possibly among other products".
//!
//! [parse::parse] turns a pattern into a [descriptor::Descriptor], and
//! [matcher::matches] decides whether a particle of a [event::DecayTree]
//! satisfies it. [facade::Finder] bundles the two for scanning many events.
pub mod config;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod facade;
pub mod location;
pub mod matcher;
pub mod parse;
pub mod particles;
pub mod report;
pub(crate) mod utils;

pub use descriptor::Descriptor;
pub use error::{DescResult, ErrorObj};
pub use event::{DecayTree, Event, Particle};
pub use facade::Finder;
pub use particles::{ParticleDb, ParticleTable};
