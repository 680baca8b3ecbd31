//! Headless browser stand-in for exercising the highlighter end to end.

pub mod page;
pub mod runner;
pub mod scenario;

pub use page::{SimLink, SimPage};
pub use runner::{ActiveChange, Report, Simulation, simulate};
pub use scenario::{Input, LinkSpec, Scenario, SectionBox, TimedInput};
