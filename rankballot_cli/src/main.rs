use clap::{App, AppSettings, Arg, SubCommand};
use num_enum::TryFromPrimitive;
use tracing_subscriber::EnvFilter;

mod command_verify;
mod command_vote;
mod config;
mod feedback;

use command_verify::command_verify;
use command_vote::command_vote;
use config::Config;

#[derive(TryFromPrimitive, PartialEq, Copy, Clone, Debug)]
#[repr(u8)]
enum Verbosity {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

fn main() {
    let digest_arg = Arg::with_name("digest")
        .long("digest")
        .short("d")
        .takes_value(true)
        .possible_values(&["sha1", "sha256"])
        .help("Signature digest - can also be set with RANKBALLOT_DIGEST [default: sha1]");

    let matches = App::new("RankBallot CLI")
        .version("0.1")
        .author("Patrick Hayes <patrick.d.hayes@gmail.com>")
        .about("Ranks a fixed set of options and signs the ballot")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .global(true)
                .help("Suppress diagnostics (rejected entries and fatal errors are still reported)"),
        )
        .subcommand(
            SubCommand::with_name("vote")
                .about("Rank every option and write a signed ballot")
                .arg(
                    Arg::with_name("OPTIONS")
                        .index(1)
                        .required(true)
                        .help("Options file, one option per line"),
                )
                .arg(
                    Arg::with_name("key")
                        .long("key")
                        .short("k")
                        .takes_value(true)
                        .help("PKCS#8 DER private key - can also be set with RANKBALLOT_PRIVATE_KEY"),
                )
                .arg(
                    Arg::with_name("out")
                        .long("out")
                        .short("o")
                        .takes_value(true)
                        .help("Where to write the signed ballot - can also be set with RANKBALLOT_ARTIFACT [default: ballot.txt]"),
                )
                .arg(digest_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Check the signature on a ballot, printing true or false")
                .arg(
                    Arg::with_name("ARTIFACT")
                        .index(1)
                        .required(true)
                        .help("Signed ballot file"),
                )
                .arg(
                    Arg::with_name("key")
                        .long("key")
                        .short("k")
                        .takes_value(true)
                        .help("X.509 DER public key - can also be set with RANKBALLOT_PUBLIC_KEY"),
                )
                .arg(digest_arg),
        )
        .get_matches();

    let verbosity = if matches.is_present("quiet") {
        Verbosity::Silent
    } else {
        let level = (Verbosity::Warn as u64 + matches.occurrences_of("v")).min(Verbosity::Debug as u64);
        Verbosity::try_from_primitive(level as u8).unwrap_or(Verbosity::Warn)
    };
    init_tracing(verbosity);

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("rankballot: invalid configuration: {}", e);
        std::process::exit(1);
    });

    // Subcommands
    match matches.subcommand() {
        ("vote", Some(matches)) => {
            let config = config.apply_vote_args(matches).unwrap_or_else(|e| {
                eprintln!("rankballot vote: {}", e);
                std::process::exit(1);
            });
            command_vote(matches, &config);
        }
        ("verify", Some(matches)) => {
            let config = config.apply_verify_args(matches).unwrap_or_else(|e| {
                eprintln!("rankballot verify: {}", e);
                std::process::exit(1);
            });
            command_verify(matches, &config);
        }
        _ => {}
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand(path: &str) -> String {
    match shellexpand::full(path) {
        Ok(expanded) => expanded.into_owned(),
        Err(_) => path.to_owned(),
    }
}
