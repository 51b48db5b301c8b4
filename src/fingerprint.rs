//! TTL-based OS fingerprinting over a single ICMP echo exchange

use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{checksum, IcmpPacket, IcmpTypes};
use rand::Rng;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::mem::MaybeUninit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const ECHO_PACKET_SIZE: usize = 16;
const REPLY_BUFFER_SIZE: usize = 1024;

/// TTL offset within the raw IPv4 datagram returned by the socket
const TTL_OFFSET: usize = 8;

/// Sends one ICMP echo request and maps the reply TTL to an OS label.
///
/// Requires raw-socket privilege; every failure mode degrades to a
/// descriptive string rather than an error.
pub struct OsFingerprinter {
    reply_timeout: Duration,
}

impl OsFingerprinter {
    pub fn new() -> Self {
        Self {
            reply_timeout: Duration::from_secs(1),
        }
    }

    /// Guess the target OS from its echo-reply TTL.
    ///
    /// Exactly one ICMP exchange, no retry. Missing privilege and a silent
    /// peer both come back as diagnostic strings.
    pub fn guess_os(&self, target: Ipv4Addr) -> String {
        let socket = match Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)) {
            Ok(socket) => socket,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return "Raw socket privilege required (run as root)".to_string();
            }
            Err(e) => {
                return format!("ICMP socket error: {}", e);
            }
        };

        if let Err(e) = socket.set_read_timeout(Some(self.reply_timeout)) {
            return format!("ICMP socket error: {}", e);
        }

        let packet = build_echo_request();
        let dest = SocketAddr::new(IpAddr::V4(target), 0);
        if let Err(e) = socket.send_to(&packet, &dest.into()) {
            return format!("ICMP send failed: {}", e);
        }

        match read_reply_ttl(&socket) {
            Some(ttl) => {
                log::debug!("echo reply from {} with ttl {}", target, ttl);
                classify_ttl(ttl).to_string()
            }
            None => "No TTL response received".to_string(),
        }
    }
}

impl Default for OsFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

fn build_echo_request() -> [u8; ECHO_PACKET_SIZE] {
    let mut buf = [0u8; ECHO_PACKET_SIZE];
    {
        let mut echo = MutableEchoRequestPacket::new(&mut buf)
            .expect("buffer sized for an echo request header");
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_identifier(rand::thread_rng().gen::<u16>());
        echo.set_sequence_number(1);
    }
    let sum = checksum(&IcmpPacket::new(&buf).expect("buffer sized for an icmp header"));
    {
        let mut echo = MutableEchoRequestPacket::new(&mut buf)
            .expect("buffer sized for an echo request header");
        echo.set_checksum(sum);
    }
    buf
}

/// Read one datagram and pull the TTL out of its IPv4 header
fn read_reply_ttl(socket: &Socket) -> Option<u8> {
    let mut uninit_buf = [MaybeUninit::<u8>::uninit(); REPLY_BUFFER_SIZE];
    match socket.recv_from(&mut uninit_buf) {
        Ok((size, _addr)) if size > TTL_OFFSET => {
            let ttl = unsafe { uninit_buf[TTL_OFFSET].assume_init() };
            Some(ttl)
        }
        Ok(_) => None,
        Err(_) => None,
    }
}

/// Map a default-TTL sample onto a coarse OS family.
///
/// Branch order matches the original heuristic: the >=128 arm is evaluated
/// first, so a TTL of 255 reports as Windows and the networking-device arm
/// is unreachable.
pub fn classify_ttl(ttl: u8) -> &'static str {
    if ttl >= 128 {
        "Windows (likely)"
    } else if ttl >= 64 {
        "Linux/Unix (likely)"
    } else if ttl == u8::MAX {
        "Cisco/Networking device"
    } else {
        "Unknown OS"
    }
}
