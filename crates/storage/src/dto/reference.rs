use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{EventKind, Gender, ResultKey};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAgeCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub born_on_or_after: Option<NaiveDate>,
    pub born_on_or_before: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventMasterRequest {
    pub age_category_id: Uuid,
    pub gender: Gender,
    pub kind: EventKind,
    #[validate(custom(function = "non_negative"))]
    pub fee: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_not_be_negative"))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInstitutionRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Operator configuration of point values for one result key; absent labels
/// fall back to the key's default.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertResultSettingRequest {
    pub result_key: ResultKey,
    #[validate(length(min = 1, max = 100))]
    pub label: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub individual_points: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub team_points: Decimal,
}
