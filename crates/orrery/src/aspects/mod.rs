pub mod calculator;
pub mod interpretation;
pub mod types;

pub use calculator::{compute_aspects, AspectCalculator};
pub use interpretation::interpret;
pub use types::{AspectMatch, AspectNature, AspectType, TransitAspect};
