use crate::config::Config;
use crate::expand;
use rankballot::*;

pub fn command_verify(matches: &clap::ArgMatches, config: &Config) {
    // Unwrap is OK, ARTIFACT is required
    let artifact_location = expand(matches.value_of("ARTIFACT").unwrap());

    let key_location = config.public_key.as_deref().unwrap_or_else(|| {
        eprintln!("rankballot verify: public key required (--key or RANKBALLOT_PUBLIC_KEY)");
        std::process::exit(1);
    });

    let artifact = std::fs::read_to_string(&artifact_location).unwrap_or_else(|e| {
        eprintln!("rankballot verify: unable to read {}: {}", &artifact_location, e);
        std::process::exit(1);
    });

    let key_bytes = std::fs::read(key_location).unwrap_or_else(|e| {
        eprintln!("rankballot verify: unable to read {}: {}", key_location, e);
        std::process::exit(1);
    });

    let verifying_key = RsaVerifyingKey::from_x509_der(&key_bytes)
        .unwrap_or_else(|e| {
            eprintln!("rankballot verify: {}", e);
            std::process::exit(1);
        })
        .with_digest(config.digest);

    match verify(&artifact, &verifying_key, &TracingDiagnostics) {
        Ok(valid) => println!("{}", valid),
        Err(e) => {
            eprintln!("rankballot verify: {}", e);
            std::process::exit(1);
        }
    }
}
