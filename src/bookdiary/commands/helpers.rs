use crate::error::{BookDiaryError, Result};

/// Resolves a user-typed id against `ids`. An exact match wins; otherwise the
/// input must be the prefix of exactly one id.
pub fn resolve_id<'a, I>(kind: &str, ids: I, input: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.trim();
    if input.is_empty() {
        return Err(BookDiaryError::Api(format!("No {} id given", kind)));
    }

    let mut candidates = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) && !candidates.contains(&id) {
            candidates.push(id);
        }
    }

    match candidates.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(BookDiaryError::Api(format!("No {} matches id {}", kind, input))),
        many => Err(BookDiaryError::Api(format!(
            "Id {} is ambiguous ({} {}s match)",
            input,
            many.len(),
            kind
        ))),
    }
}
