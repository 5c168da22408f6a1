use crate::error::FormsetError;

use super::OWNER_SEPARATOR;

/// Remove an embedded owner index from a compound identifier:
/// `field_choices_3` becomes `field_choices`, while `choices_3` (a single
/// separator) is returned unchanged.
///
/// This counts separators rather than tokenizing. When more than one
/// separator is present but the last segment is not numeric the
/// identifier is reported as ambiguous instead of being cut short.
pub fn strip_trailing_index(prefix: &str) -> Result<&str, FormsetError> {
    let separators = prefix
        .matches(OWNER_SEPARATOR)
        .count();
    if separators <= 1 {
        return Ok(prefix);
    }

    match prefix.rsplit_once(OWNER_SEPARATOR) {
        Some((head, tail))
            if !tail.is_empty()
                && tail
                    .bytes()
                    .all(|b| b.is_ascii_digit()) =>
        {
            Ok(head)
        }
        _ => Err(FormsetError::PrefixAmbiguity {
            prefix: prefix.to_string(),
        }),
    }
}
