//! dataguardian - PII detection and GDPR/UAVG compliance scanning CLI
//!
//! Reads a scan request as JSON, runs the scan, and writes the scan result
//! as JSON. A scan always completes with a result; only initialization
//! failures exit non-zero.
//!
//! # Usage
//!
//! ```bash
//! # Scan request on stdin, result on stdout
//! echo '{"source":{"type":"code","path":"/srv/app"}}' | dataguardian
//!
//! # Request from a file, EU rule set, pretty output
//! dataguardian --jurisdiction=eu --pretty request.json
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use dataguardian::{
    audit::AuditLogger,
    config::Config,
    input::ScanRequest,
    rules::Jurisdiction,
    scanner::ScanEngine,
};

/// Print version information
fn print_version() {
    println!("dataguardian {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"dataguardian - PII detection and GDPR/UAVG compliance scanning

USAGE:
    dataguardian [OPTIONS] [REQUEST_FILE]

    The scan request is read from REQUEST_FILE when given, otherwise from
    stdin. The scan result is written to stdout as JSON.

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -j, --jurisdiction      Rule set: nl, eu, global (default: nl)
    -c, --config PATH       Path to config file
    -w, --workers N         Worker threads for tree scans (0 = cores)
    -p, --pretty            Pretty-print the result JSON

REQUEST FORMAT:
    {{"source": {{"type": "code", "path": "/srv/app"}}, "jurisdiction": "nl"}}

    Source types: code, database, website, image, cloud

ENVIRONMENT:
    RUST_LOG                Log filter (logs go to stderr)
"#
    );
}

/// Parsed command line arguments
struct Args {
    help: bool,
    version: bool,
    jurisdiction: Option<Jurisdiction>,
    config_path: Option<String>,
    workers: Option<usize>,
    pretty: bool,
    request_file: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            jurisdiction: None,
            config_path: None,
            workers: None,
            pretty: false,
            request_file: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-p" | "--pretty" => result.pretty = true,
                "-j" | "--jurisdiction" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.jurisdiction = Jurisdiction::from_str(&args[i]);
                    }
                }
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-w" | "--workers" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.workers = args[i].parse().ok();
                    }
                }
                arg if arg.starts_with("--jurisdiction=") => {
                    let j = arg.trim_start_matches("--jurisdiction=");
                    result.jurisdiction = Jurisdiction::from_str(j);
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                arg if arg.starts_with("--workers=") => {
                    let n = arg.trim_start_matches("--workers=");
                    result.workers = n.parse().ok();
                }
                arg if !arg.starts_with('-') => {
                    result.request_file = Some(arg.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the result JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    // Load configuration
    let mut config = if let Some(ref path) = args.config_path {
        match Config::load_from(std::path::Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: Failed to load config from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Config::load()
    };

    if let Some(workers) = args.workers {
        config.scan.workers = workers;
    }

    // Read the request
    let request_json = match args.request_file {
        Some(ref path) => match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: Failed to read request from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: Failed to read request from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    if request_json.trim().is_empty() {
        eprintln!("Error: Empty scan request");
        return ExitCode::FAILURE;
    }

    let request = match ScanRequest::from_json(&request_json) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Jurisdiction priority: CLI flag, then request field, then config
    if let Some(jurisdiction) = args.jurisdiction.or(request.jurisdiction) {
        config.general.jurisdiction = jurisdiction;
    }

    // Build the engine; a rule that fails to compile is fatal here
    let engine = match ScanEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = engine.scan(&request);

    // Log to the audit trail
    let audit_path = if config.general.audit_log {
        config.audit_path()
    } else {
        None
    };
    let mut logger = AuditLogger::new(audit_path.as_deref());
    if let Err(e) = logger.log_scan(&request, &result) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    // Write the result
    let json = if args.pretty {
        result.to_json_pretty()
    } else {
        result.to_json()
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();

    ExitCode::SUCCESS
}
