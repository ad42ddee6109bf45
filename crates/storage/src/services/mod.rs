pub mod chest_numbers;
pub mod finance;
pub mod registration;
pub mod results;
