use crate::config::Config;
use crate::expand;
use crate::feedback::VoterFeedback;
use rankballot::*;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

pub fn command_vote(matches: &clap::ArgMatches, config: &Config) {
    // Unwrap is OK, OPTIONS is required
    let options_location = expand(matches.value_of("OPTIONS").unwrap());

    let key_location = config.private_key.as_deref().unwrap_or_else(|| {
        eprintln!("rankballot vote: private key required (--key or RANKBALLOT_PRIVATE_KEY)");
        std::process::exit(1);
    });

    if let Err(e) = vote(&options_location, key_location, config) {
        eprintln!("rankballot vote: {}", e);
        std::process::exit(1);
    }
}

fn vote(options_location: &str, key_location: &str, config: &Config) -> Result<(), String> {
    let diagnostics = VoterFeedback::stderr();

    let key_bytes = std::fs::read(key_location)
        .map_err(|e| format!("unable to read {}: {}", key_location, e))?;
    let signing_key = RsaSigningKey::from_pkcs8_der(&key_bytes)
        .map_err(|e| e.to_string())?
        .with_digest(config.digest);

    let catalog = load_catalog(options_location)?;
    diagnostics.report(&Event::CatalogLoaded {
        options: catalog.len(),
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    catalog
        .write_listing(&mut out)
        .and_then(|_| out.flush())
        .map_err(|e| format!("unable to write options: {}", e))?;

    let stdin = std::io::stdin();
    let selection =
        collect_selection(&catalog, stdin.lock(), &diagnostics).map_err(|e| e.to_string())?;

    // Show the voter their final ranking before it gets signed
    write_selection_order(&selection, &catalog, &mut out).map_err(|e| e.to_string())?;
    writeln!(out).map_err(|e| format!("unable to write selection: {}", e))?;

    let payload = encode(&selection, &catalog).map_err(|e| e.to_string())?;
    let artifact = sign(&payload, &signing_key, &diagnostics).map_err(|e| e.to_string())?;

    std::fs::write(&config.artifact, artifact.to_bytes())
        .map_err(|e| format!("unable to write ballot to {}: {}", &config.artifact, e))?;

    Ok(())
}

fn load_catalog(location: &str) -> Result<Catalog, String> {
    let file = File::open(location).map_err(|e| format!("unable to read {}: {}", location, e))?;
    Catalog::from_reader(BufReader::new(file)).map_err(|e| format!("{}: {}", location, e))
}
