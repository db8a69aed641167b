mod trait_step;

pub use trait_step::{ResearchStep, SectionOutcome, StepOutput, StepResult};
