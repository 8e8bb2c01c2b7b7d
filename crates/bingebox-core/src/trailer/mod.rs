mod coordinator;
mod lookup;

pub use coordinator::{Subject, TrailerCoordinator, TrailerRequest, TrailerResponse, TrailerStatus};
pub use lookup::{LookupOutcome, TrailerFilter, TrailerLookup};
