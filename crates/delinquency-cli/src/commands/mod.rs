pub mod interventions;
pub mod portfolio;
pub mod prediction;
pub mod risk;
