pub mod clock;
pub mod endpoints;
pub mod season;
pub mod snapshot;
pub mod station;
pub mod variable;
