//! Field checks shared by the entity managers.
//!
//! A field counts as present when it is supplied and not blank: strings must
//! contain something other than whitespace and numbers must be non-zero.

use crate::domain::errors::{LibraryError, LibraryResult};

/// Return the trimmed value of a required text field
pub fn required_text(value: Option<String>) -> LibraryResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(LibraryError::invalid_data()),
    }
}

/// Return the value of a required numeric field
pub fn required_number<T>(value: Option<T>) -> LibraryResult<T>
where
    T: Copy + Default + PartialEq,
{
    match value {
        Some(number) if number != T::default() => Ok(number),
        _ => Err(LibraryError::invalid_data()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims_and_rejects_blank() {
        assert_eq!(required_text(Some("  Anna ".to_string())).unwrap(), "Anna");
        assert!(matches!(required_text(Some("   ".to_string())), Err(LibraryError::Validation(_))));
        assert!(matches!(required_text(None), Err(LibraryError::Validation(_))));
    }

    #[test]
    fn test_required_number_rejects_missing_and_zero() {
        assert_eq!(required_number(Some(1999)).unwrap(), 1999);
        assert_eq!(required_number(Some(-4_i64)).unwrap(), -4);
        assert!(required_number(Some(0)).is_err());
        assert!(required_number::<i32>(None).is_err());
    }
}
