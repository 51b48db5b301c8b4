//! Port specification grammar and service table tests over the public API

use portspectre::{parse_port_spec, ScanError, ServiceTable, SpeedProfile};
use std::time::Duration;

#[test]
fn test_comma_list_order_and_duplicates_survive() {
    let ports = parse_port_spec("443,22,443,80").unwrap();
    assert_eq!(ports, vec![443, 22, 443, 80]);
}

#[test]
fn test_range_expands_ascending() {
    let ports = parse_port_spec("20-30").unwrap();
    assert_eq!(ports, (20..=30).collect::<Vec<u16>>());
}

#[test]
fn test_single_port() {
    assert_eq!(parse_port_spec("22").unwrap(), vec![22]);
}

#[test]
fn test_descending_range_is_invalid() {
    assert!(matches!(
        parse_port_spec("30-20"),
        Err(ScanError::PortSpec(_))
    ));
}

#[test]
fn test_boundary_violations_are_invalid() {
    for spec in ["0", "65536", "abc", "10-", "0-100", "1-70000"] {
        assert!(
            matches!(parse_port_spec(spec), Err(ScanError::PortSpec(_))),
            "spec {:?} should be rejected",
            spec
        );
    }
}

#[test]
fn test_boundary_values_are_valid() {
    assert_eq!(parse_port_spec("1").unwrap(), vec![1]);
    assert_eq!(parse_port_spec("65535").unwrap(), vec![65535]);
    assert_eq!(parse_port_spec("65534-65535").unwrap(), vec![65534, 65535]);
}

#[test]
fn test_mixed_comma_and_range_is_invalid() {
    let err = parse_port_spec("20-25,30").unwrap_err();
    assert!(err.to_string().contains("20-25"));
}

#[test]
fn test_whitespace_is_tolerated_around_tokens() {
    assert_eq!(parse_port_spec(" 80 , 443 ").unwrap(), vec![80, 443]);
    assert_eq!(parse_port_spec(" 5 - 7 ").unwrap(), vec![5, 6, 7]);
}

#[test]
fn test_service_table_required_entries() {
    let table = ServiceTable::new();
    let expected = [
        (21, "ftp"),
        (22, "ssh"),
        (23, "telnet"),
        (25, "smtp"),
        (53, "dns"),
        (80, "http"),
        (110, "pop3"),
        (143, "imap"),
        (443, "https"),
        (3306, "mysql"),
        (3389, "rdp"),
        (5900, "vnc"),
        (8080, "http-proxy"),
    ];
    for (port, name) in expected {
        assert_eq!(table.lookup(port), name, "port {}", port);
    }
    assert_eq!(table.lookup(9999), "unknown");
}

#[test]
fn test_speed_profiles_map_to_documented_timeouts() {
    assert_eq!(SpeedProfile::Slow.timeout(), Duration::from_secs_f64(1.5));
    assert_eq!(SpeedProfile::Normal.timeout(), Duration::from_secs_f64(0.7));
    assert_eq!(SpeedProfile::Fast.timeout(), Duration::from_secs_f64(0.3));
    assert_eq!(
        SpeedProfile::Aggressive.timeout(),
        Duration::from_secs_f64(0.05)
    );
}
