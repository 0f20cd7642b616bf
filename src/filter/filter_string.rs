use super::error::FilterError;
use super::types::{FilterString, FilterTerm};

const SEGMENT_DELIMITER: char = ',';
const FIELD_SEPARATOR: char = ':';

/// Tokenizes a `field:value,field:value` filter string.
///
/// Only the first `:` of a segment separates field from value, so values may
/// contain further colons. Nothing is trimmed and there is no escape character:
/// a comma always starts a new segment.
pub fn parse(raw: Option<&str>) -> Result<FilterString, FilterError> {
    let Some(raw) = raw else {
        return Ok(vec![]);
    };

    let mut terms = Vec::new();
    for segment in raw.split(SEGMENT_DELIMITER) {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once(FIELD_SEPARATOR) {
            Some((field, value)) if !field.is_empty() => terms.push(FilterTerm {
                field: field.to_string(),
                value: value.to_string(),
            }),
            _ => return Err(FilterError::InvalidFilterString(raw.to_string())),
        }
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(field: &str, value: &str) -> FilterTerm {
        FilterTerm { field: field.to_string(), value: value.to_string() }
    }

    #[test]
    fn absent_filter_is_empty() {
        assert_eq!(parse(None).unwrap(), vec![]);
        assert_eq!(parse(Some("")).unwrap(), vec![]);
    }

    #[test]
    fn splits_segments_in_order() {
        let terms = parse(Some("name_phrase:home,id:3")).unwrap();
        assert_eq!(terms, vec![term("name_phrase", "home"), term("id", "3")]);
    }

    #[test]
    fn only_first_colon_separates() {
        let terms = parse(Some("name_phrase:a:b:c")).unwrap();
        assert_eq!(terms, vec![term("name_phrase", "a:b:c")]);
    }

    #[test]
    fn whitespace_is_preserved() {
        let terms = parse(Some(" name_phrase:home ")).unwrap();
        assert_eq!(terms, vec![term(" name_phrase", "home ")]);
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(parse(Some("name_phrase:")).unwrap(), vec![term("name_phrase", "")]);
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(parse(Some(",name_phrase:x,,")).unwrap(), vec![term("name_phrase", "x")]);
    }

    #[test]
    fn segment_without_colon_fails_with_raw_string() {
        let err = parse(Some("name_phrase:home,bogus")).unwrap_err();
        assert_eq!(err, FilterError::InvalidFilterString("name_phrase:home,bogus".to_string()));
        assert!(err.to_string().starts_with("INVALID_FILTER_STRING"));
    }

    #[test]
    fn empty_field_name_fails() {
        assert!(matches!(parse(Some(":home")), Err(FilterError::InvalidFilterString(_))));
    }
}
