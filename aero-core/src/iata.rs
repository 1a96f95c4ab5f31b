use crate::{CoreError, CoreResult};

/// Length of an IATA airport / city code
pub const LOCATION_CODE_LEN: usize = 3;

/// Trim and upper-case a user-entered location code, rejecting anything that
/// is not exactly three ASCII letters.
pub fn normalize_location_code(raw: &str, field: &str) -> CoreResult<String> {
    let code = raw.trim();

    if code.is_empty() {
        return Err(CoreError::ValidationError(format!("{} airport code is required", field)));
    }

    if code.chars().count() != LOCATION_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "{} airport code must be 3 letters (e.g., IST, JFK), got {:?}",
            field, code
        )));
    }

    Ok(code.to_ascii_uppercase())
}
