pub mod events;
pub mod finance;
pub mod institution_events;
pub mod participants;
pub mod results;
pub mod teams;
