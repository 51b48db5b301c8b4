use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::process;

use portspectre::{
    config::{ConcurrencyMode, ScanConfig, SpeedProfile},
    fingerprint::OsFingerprinter,
    output::TerminalSink,
    ports::parse_port_spec,
    scanner::ScanEngine,
    ScanError,
};

fn print_banner() {
    let art = r#"
                    __                      __
   ____  ____  ____/ /_________  ___  _____/ /_________
  / __ \/ __ \/ __  / ___/ __ \/ _ \/ ___/ __/ ___/ _ \
 / /_/ / /_/ / /_/ (__  ) /_/ /  __/ /__/ /_/ /  /  __/
/ .___/\____/\__,_/____/ .___/\___/\___/\__/_/   \___/
/_/                   /_/
"#;
    println!("{}", art.cyan());
}

fn build_cli() -> Command {
    Command::new("portspectre")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent TCP connect scanner")
        .arg(
            Arg::new("target")
                .help("Target IP or hostname")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("ports")
                .help("Ports: 80,443 or 20-30 or 22")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("banner")
                .short('b')
                .long("banner")
                .help("Grab banners from open ports")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("concurrent")
                .short('m')
                .long("multithreading")
                .help("Probe ports concurrently")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("services")
                .short('s')
                .long("services")
                .help("Annotate open ports with service names")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("os")
                .long("os")
                .help("Attempt OS detection via ICMP TTL")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .help("Timeout preset")
                .value_parser(["slow", "normal", "fast", "aggressive"])
                .default_value("normal"),
        )
        .arg(
            Arg::new("open-only")
                .long("open-only")
                .help("Show only open ports")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .help("Save output to a file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
}

/// Resolve a hostname or address literal to the first IPv4 address
fn resolve_host(target: &str) -> portspectre::Result<Ipv4Addr> {
    if let Ok(addr) = target.parse::<Ipv4Addr>() {
        return Ok(addr);
    }

    let candidates = (target, 0u16)
        .to_socket_addrs()
        .map_err(|_| ScanError::HostResolution(target.to_string()))?;

    candidates
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ScanError::HostResolution(target.to_string()))
}

async fn run() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("no-color") {
        colored::control::set_override(false);
    }

    print_banner();

    let target = matches.get_one::<String>("target").unwrap();
    let port_spec = matches.get_one::<String>("ports").unwrap();
    let profile: SpeedProfile = matches
        .get_one::<String>("profile")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;

    // both validations run before any network traffic
    let target_ip = resolve_host(target)?;
    let ports = parse_port_spec(port_spec)?;

    let mode = if matches.get_flag("concurrent") {
        ConcurrencyMode::BoundedParallel
    } else {
        ConcurrencyMode::Sequential
    };

    let config = ScanConfig::new(target_ip.to_string())
        .with_ports(ports)
        .with_profile(profile)
        .with_mode(mode)
        .with_banner_grab(matches.get_flag("banner"))
        .with_services(matches.get_flag("services"))
        .with_open_only(matches.get_flag("open-only"));

    println!(
        "\n[*] Scanning {} using '{}' profile...\n",
        target_ip.to_string().cyan(),
        profile.name()
    );

    let sink = TerminalSink::new();
    let buffer = sink.buffer();

    if matches.get_flag("os") {
        println!("[*] Detecting OS...");
        let guess = OsFingerprinter::new().guess_os(target_ip);
        println!("    {}\n", format!("OS Guess: {}", guess).yellow());
        buffer.push_line(format!("OS Guess: {}", guess));
        buffer.push_line(String::new());
    }

    let engine = ScanEngine::new(config)?;
    let summary = engine.scan(Box::new(sink)).await?;

    println!(
        "\nScan complete. {} open, {} closed.\n",
        summary.stats.open.to_string().green(),
        summary.stats.closed.to_string().red()
    );

    if let Some(path) = matches.get_one::<String>("save") {
        buffer.save_to_file(path)?;
        println!("{}", format!("[+] Results saved to {}", path).green());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
