use crate::expand;
use rankballot::DigestAlgorithm;
use std::env::var;

pub const DEFAULT_ARTIFACT: &str = "ballot.txt";

pub struct Config {
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    pub artifact: String,
    pub digest: DigestAlgorithm,
}

impl Config {
    pub fn from_env() -> Result<Self, rankballot::Error> {
        Self::from_lookup(|name| var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, rankballot::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key = lookup("RANKBALLOT_PRIVATE_KEY").map(|path| expand(&path));
        let public_key = lookup("RANKBALLOT_PUBLIC_KEY").map(|path| expand(&path));

        let artifact = match lookup("RANKBALLOT_ARTIFACT") {
            Some(path) => expand(&path),
            None => DEFAULT_ARTIFACT.to_owned(),
        };

        let digest = match lookup("RANKBALLOT_DIGEST") {
            Some(name) => name.parse()?,
            None => DigestAlgorithm::default(),
        };

        Ok(Config {
            private_key,
            public_key,
            artifact,
            digest,
        })
    }

    /// Apply `vote` arguments; they take precedence over the environment.
    pub fn apply_vote_args(mut self, matches: &clap::ArgMatches) -> Result<Self, rankballot::Error> {
        if let Some(key) = matches.value_of("key") {
            self.private_key = Some(expand(key));
        }
        if let Some(out) = matches.value_of("out") {
            self.artifact = expand(out);
        }
        self.apply_digest_arg(matches)
    }

    /// Apply `verify` arguments; they take precedence over the environment.
    pub fn apply_verify_args(mut self, matches: &clap::ArgMatches) -> Result<Self, rankballot::Error> {
        if let Some(key) = matches.value_of("key") {
            self.public_key = Some(expand(key));
        }
        self.apply_digest_arg(matches)
    }

    fn apply_digest_arg(mut self, matches: &clap::ArgMatches) -> Result<Self, rankballot::Error> {
        if let Some(digest) = matches.value_of("digest") {
            self.digest = digest.parse()?;
        }
        Ok(self)
    }
}
