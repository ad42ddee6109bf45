mod age_category;
mod event;
mod event_master;
mod event_result;
mod fund_transfer;
mod institution;
mod institution_event;
mod participant;
mod participant_event;
mod result_setting;
mod team_entry;

pub use age_category::AgeCategory;
pub use event::Event;
pub use event_master::{EventKind, EventMaster, Gender};
pub use event_result::{
    EventResultStatus, IndividualEventResult, InstitutionEventResult, ResultStatusLabel,
    TeamEventResult,
};
pub use fund_transfer::FundTransfer;
pub use institution::Institution;
pub use institution_event::InstitutionEventRegistration;
pub use participant::{Participant, ParticipantStatus};
pub use participant_event::ParticipantEvent;
pub use result_setting::{ResultKey, ResultMasterSetting};
pub use team_entry::{ReviewStatus, TeamEntry, TeamEntryMember};

/// Outcome of checking a status transition against the legal-transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCheck {
    Allowed,
    AlreadyThere,
    Invalid,
}
