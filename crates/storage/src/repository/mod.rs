pub mod event;
pub mod finance;
pub mod fund_transfer;
pub mod institution;
pub mod institution_event;
pub mod participant;
pub mod results;
pub mod team_entry;
