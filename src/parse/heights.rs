use crate::parse::error::{InputError, ParseResult, Span};

/// Parse a row of column heights from raw user text.
///
/// Two grammars are accepted, matching what people paste from notes or
/// code: a bracketed JSON-style list (`[0, 1, 0, 2]`) or a bare
/// comma-separated list (`0, 1, 0, 2`). Blank input is the empty row.
pub fn parse_heights(input: &str) -> ParseResult<Vec<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        parse_bracketed(trimmed)
    } else {
        parse_bare(input)
    }
}

fn parse_bracketed(text: &str) -> ParseResult<Vec<u32>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| InputError::malformed(format!("not a valid list: {}", e)))?;

    let mut heights = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        heights.push(element_height(value, i + 1)?);
    }
    Ok(heights)
}

fn element_height(value: &serde_json::Value, ordinal: usize) -> ParseResult<u32> {
    let num = match value {
        serde_json::Value::Number(n) => n,
        other => {
            return Err(InputError::invalid_value(format!(
                "element {}: not a number: {}",
                ordinal, other
            )));
        }
    };

    if let Some(v) = num.as_u64() {
        return u32::try_from(v).map_err(|_| {
            InputError::invalid_value(format!("element {}: height out of range: {}", ordinal, v))
        });
    }
    if let Some(v) = num.as_i64() {
        return Err(InputError::invalid_value(format!(
            "element {}: negative height: {}",
            ordinal, v
        )));
    }
    to_height(num.as_f64().unwrap_or(f64::NAN), &num.to_string())
        .map_err(|e| InputError::new(e.kind, format!("element {}: {}", ordinal, e.message)))
}

/// Bare comma-separated numbers. Empty segments are skipped, so leading,
/// trailing, and doubled commas are all tolerated.
fn parse_bare(input: &str) -> ParseResult<Vec<u32>> {
    let mut heights = Vec::new();
    let mut start = 0;

    for piece in input.split(',') {
        let token = piece.trim();
        if !token.is_empty() {
            let lead = piece.len() - piece.trim_start().len();
            let span = Span::new(start + lead, start + lead + token.len());
            let value: f64 = token.parse().map_err(|_| {
                InputError::invalid_value(format!("not a number: '{}'", token)).with_span(span)
            })?;
            heights.push(to_height(value, token).map_err(|e| e.with_span(span))?);
        }
        start += piece.len() + 1;
    }

    Ok(heights)
}

/// Validate one parsed number as a column height.
fn to_height(value: f64, shown: &str) -> ParseResult<u32> {
    if !value.is_finite() {
        return Err(InputError::invalid_value(format!("not a number: {}", shown)));
    }
    if value < 0.0 {
        return Err(InputError::invalid_value(format!(
            "negative height: {}",
            shown
        )));
    }
    if value.fract() != 0.0 {
        return Err(InputError::invalid_value(format!(
            "not a whole number: {}",
            shown
        )));
    }
    if value > f64::from(u32::MAX) {
        return Err(InputError::invalid_value(format!(
            "height out of range: {}",
            shown
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::error::InputErrorKind;

    fn kind_of(input: &str) -> InputErrorKind {
        parse_heights(input).unwrap_err().kind
    }

    #[test]
    fn test_blank_input_is_the_empty_row() {
        assert_eq!(parse_heights("").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_heights("   ").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_heights(",,,").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_heights("[]").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_bare_list() {
        assert_eq!(parse_heights("0,1,0,2").unwrap(), vec![0, 1, 0, 2]);
        assert_eq!(parse_heights(" 3, 0 , 3 ").unwrap(), vec![3, 0, 3]);
        assert_eq!(parse_heights("1,2,").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_bracketed_list() {
        assert_eq!(parse_heights("[4, 2, 0, 3, 2, 5]").unwrap(), vec![4, 2, 0, 3, 2, 5]);
        assert_eq!(parse_heights("  [1,2,3]  ").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_number_spellings() {
        // Integer-valued floats and scientific notation name whole columns.
        assert_eq!(parse_heights("3.0, 1e2").unwrap(), vec![3, 100]);
        assert_eq!(parse_heights("[3.0, 1e2]").unwrap(), vec![3, 100]);
    }

    #[test]
    fn test_junk_token_is_invalid_with_span() {
        let err = parse_heights("1,two,3").unwrap_err();
        assert_eq!(err.kind, InputErrorKind::InvalidValue);
        assert_eq!(err.span, Some(Span::new(2, 5)));
        assert!(err.message.contains("two"), "message was: {}", err.message);
    }

    #[test]
    fn test_negative_heights_rejected() {
        assert_eq!(kind_of("-2,1"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("[1, -2]"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("[1, -0.5]"), InputErrorKind::InvalidValue);
    }

    #[test]
    fn test_fractional_heights_rejected() {
        let err = parse_heights("1.5").unwrap_err();
        assert_eq!(err.kind, InputErrorKind::InvalidValue);
        assert!(err.message.contains("whole"), "message was: {}", err.message);
        assert_eq!(kind_of("[1.5]"), InputErrorKind::InvalidValue);
    }

    #[test]
    fn test_oversized_heights_rejected() {
        assert_eq!(kind_of("5000000000"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("[5000000000]"), InputErrorKind::InvalidValue);
        // The largest representable height still parses.
        assert_eq!(parse_heights("4294967295").unwrap(), vec![u32::MAX]);
    }

    #[test]
    fn test_non_finite_spellings_rejected() {
        // str::parse::<f64> accepts these, so they need their own check.
        assert_eq!(kind_of("inf"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("NaN,1"), InputErrorKind::InvalidValue);
    }

    #[test]
    fn test_bad_bracket_syntax_is_malformed() {
        assert_eq!(kind_of("[1, 2,]"), InputErrorKind::MalformedInput);
        assert_eq!(kind_of("[1 2]"), InputErrorKind::MalformedInput);
        assert_eq!(kind_of("[1, two]"), InputErrorKind::MalformedInput);
    }

    #[test]
    fn test_unclosed_bracket_falls_back_to_bare_grammar() {
        // Without the closing bracket this is read as a bare list, where
        // "[1" is simply not a number.
        let err = parse_heights("[1, 2").unwrap_err();
        assert_eq!(err.kind, InputErrorKind::InvalidValue);
        assert_eq!(err.span, Some(Span::new(0, 2)));
    }

    #[test]
    fn test_non_number_elements_rejected() {
        assert_eq!(kind_of("[1, \"two\"]"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("[[1, 2]]"), InputErrorKind::InvalidValue);
        assert_eq!(kind_of("[null]"), InputErrorKind::InvalidValue);
    }
}
