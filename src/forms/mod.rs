mod chapter;
mod collection;
mod series;
mod volume;

pub use chapter::ChapterForm;
pub use collection::CollectionForm;
pub use series::SeriesForm;
pub use volume::VolumeForm;

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::Record;

/// Free-text form state for one entity kind. Blank in create mode,
/// prefilled from a fetched record in edit mode; `payload()` turns the
/// text into a typed draft. Cancelling is the caller's business: no
/// payload, no server call.
pub trait EntityForm: Default {
    type Record: Record;

    /// Edit-mode prefill; absent optionals become empty strings and id
    /// lists are joined with commas.
    fn prefill(record: &Self::Record) -> Self;

    fn payload(&self) -> Result<<Self::Record as Record>::Draft, FormError>;

    /// Label/value pairs in display order, for a screen to render and edit.
    fn fields(&mut self) -> Vec<(&'static str, &mut String)>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{0} must be a whole number.")]
    InvalidNumber(&'static str),
    #[error("{0} must be a comma-separated list of numbers.")]
    InvalidIdList(&'static str),
    #[error("{0} must be a date in YYYY-MM-DD format.")]
    InvalidDate(&'static str),
}

/// Whitespace-only counts as empty.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required(field));
    }

    Ok(value.to_owned())
}

pub(crate) fn optional_date(
    value: &str,
    field: &'static str,
) -> Result<Option<NaiveDate>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse()
        .map(Some)
        .map_err(|_| FormError::InvalidDate(field))
}

/// Empty text is "no reference", never 0.
pub(crate) fn optional_reference(
    value: &str,
    field: &'static str,
) -> Result<Option<u32>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber(field))
}

pub(crate) fn required_reference(value: &str, field: &'static str) -> Result<u32, FormError> {
    optional_reference(value, field)?.ok_or(FormError::Required(field))
}

/// Comma-separated id list. Empty input means "no value", not an empty
/// list, and empty tokens ("1,,3") are skipped.
pub(crate) fn optional_id_list(
    value: &str,
    field: &'static str,
) -> Result<Option<Vec<u32>>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    let mut ids = Vec::new();
    for token in value.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        ids.push(token.parse().map_err(|_| FormError::InvalidIdList(field))?);
    }

    if ids.is_empty() {
        return Ok(None);
    }

    Ok(Some(ids))
}

pub(crate) fn join_ids(ids: &Option<Vec<u32>>) -> String {
    match ids {
        Some(ids) => ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(","),
        None => String::new(),
    }
}
