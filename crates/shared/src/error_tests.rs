use super::*;

#[test]
fn test_parse_error_codes() {
    assert_eq!(ParseError::guid("zz", "bad").error_code(), "INVALID_GUID");
    assert_eq!(ParseError::amount("x", "bad").error_code(), "INVALID_AMOUNT");
}

#[test]
fn test_parse_error_text() {
    assert_eq!(ParseError::guid("abc", "too short").text(), "abc");
    assert_eq!(ParseError::amount("1/0", "zero denominator").text(), "1/0");
}

#[test]
fn test_parse_error_display() {
    assert_eq!(
        format!("{}", ParseError::guid("abc", "too short")),
        "Invalid GUID \"abc\": too short"
    );
    assert_eq!(
        format!("{}", ParseError::amount("1/0", "zero denominator")),
        "Invalid amount \"1/0\": zero denominator"
    );
}

#[test]
fn test_parse_error_reason() {
    assert_eq!(ParseError::guid("abc", "too short").reason(), "too short");
    let err = crate::types::Amount::parse("1/0").unwrap_err();
    assert_eq!(err.reason(), "zero denominator");
}
