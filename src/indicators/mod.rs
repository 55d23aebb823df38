pub mod crossover;
pub mod validation;

pub mod momentum;
pub mod trend;

pub use crossover::*;
pub use validation::*;
