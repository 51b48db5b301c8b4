//! Port specification parsing
//!
//! Accepts a comma list ("80,443,8080"), a single inclusive range ("20-30"),
//! or a bare port ("22"). The comma form wins over the range form, and a
//! range token inside a comma list is rejected rather than expanded, so mixed
//! specs like "20-25,80" are an explicit error. All validation happens before
//! any network I/O.

use crate::{Result, ScanError};

/// Parse and validate a port specification into an ordered port list.
///
/// Comma lists keep the order given, with no deduplication; ranges expand in
/// ascending order.
pub fn parse_port_spec(spec: &str) -> Result<Vec<u16>> {
    let spec = spec.trim();

    if spec.contains(',') {
        return spec.split(',').map(|t| parse_single(t.trim())).collect();
    }

    if spec.contains('-') {
        return parse_range(spec);
    }

    Ok(vec![parse_single(spec)?])
}

fn parse_range(spec: &str) -> Result<Vec<u16>> {
    let mut parts = spec.splitn(2, '-');
    let start_tok = parts.next().unwrap_or("").trim();
    let end_tok = parts.next().unwrap_or("").trim();

    if !is_all_digits(start_tok) || !is_all_digits(end_tok) {
        return Err(ScanError::PortSpec(
            "Port range must contain only numbers".to_string(),
        ));
    }

    let start = parse_bounded(start_tok)?;
    let end = parse_bounded(end_tok)?;

    if start > end {
        return Err(ScanError::PortSpec(format!(
            "Port range {}-{} is not ascending",
            start, end
        )));
    }

    Ok((start..=end).collect())
}

fn parse_single(token: &str) -> Result<u16> {
    if !is_all_digits(token) {
        return Err(ScanError::PortSpec(format!(
            "'{}' is not a valid port number",
            token
        )));
    }
    parse_bounded(token)
}

fn parse_bounded(token: &str) -> Result<u16> {
    // parsed wide so 65536 reports out-of-range rather than overflow
    let value: u64 = token
        .parse()
        .map_err(|_| ScanError::PortSpec(format!("'{}' is not a valid port number", token)))?;

    if !(1..=65535).contains(&value) {
        return Err(ScanError::PortSpec(format!(
            "Port {} must be between 1 and 65535",
            value
        )));
    }

    Ok(value as u16)
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_port() {
        assert_eq!(parse_port_spec("22").unwrap(), vec![22]);
        assert_eq!(parse_port_spec(" 443 ").unwrap(), vec![443]);
    }

    #[test]
    fn test_comma_list_preserves_order_and_duplicates() {
        assert_eq!(parse_port_spec("443,80,443").unwrap(), vec![443, 80, 443]);
        assert_eq!(parse_port_spec("80, 22 ,8080").unwrap(), vec![80, 22, 8080]);
    }

    #[test]
    fn test_range_ascending() {
        assert_eq!(parse_port_spec("20-25").unwrap(), vec![20, 21, 22, 23, 24, 25]);
        assert_eq!(parse_port_spec("80-80").unwrap(), vec![80]);
        assert_eq!(parse_port_spec(" 1 - 3 ").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_descending_range_rejected() {
        assert!(matches!(
            parse_port_spec("30-20"),
            Err(ScanError::PortSpec(_))
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(parse_port_spec("0").is_err());
        assert!(parse_port_spec("65536").is_err());
        assert!(parse_port_spec("1-65536").is_err());
        assert!(parse_port_spec("0-10").is_err());
        assert_eq!(parse_port_spec("65535").unwrap(), vec![65535]);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(parse_port_spec("abc").is_err());
        assert!(parse_port_spec("10-").is_err());
        assert!(parse_port_spec("-10").is_err());
        assert!(parse_port_spec("80,,443").is_err());
        assert!(parse_port_spec("8o").is_err());
    }

    #[test]
    fn test_mixed_spec_rejected_with_token_named() {
        let err = parse_port_spec("20-25,80").unwrap_err();
        assert!(err.to_string().contains("'20-25'"));
    }

    #[test]
    fn test_negative_numbers_rejected() {
        // "-5" hits the range branch and fails the digit check
        assert!(parse_port_spec("-5").is_err());
        assert!(parse_port_spec("80,-5").is_err());
    }
}
