pub mod activity_step;
pub mod availability_step;
pub mod toxicity_step;

pub use activity_step::ActivityStep;
pub use availability_step::AvailabilityStep;
pub use toxicity_step::ToxicityStep;
