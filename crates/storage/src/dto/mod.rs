pub mod actor;
pub mod finance;
pub mod reference;
pub mod registration;
pub mod results;
