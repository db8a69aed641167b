pub mod molsearch_flow;

pub use molsearch_flow::steps::{ActivityStep, AvailabilityStep, ToxicityStep};
