use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("rankballot: malformed catalog: no options found")]
    MalformedCatalog,

    #[error("rankballot: option {position} is out of range (1..={max})")]
    OutOfRange { position: usize, max: usize },

    #[error("rankballot: I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rankballot: premature end of input: ranked {collected} of {expected} options")]
    PrematureEnd { collected: usize, expected: usize },

    #[error("rankballot: incomplete selection: ranked {collected} of {expected} options")]
    IncompleteSelection { collected: usize, expected: usize },

    #[error("rankballot: selection was made over {selection} options but the catalog has {catalog}")]
    CatalogMismatch { selection: usize, catalog: usize },

    #[error("rankballot: unknown digest algorithm {0:?} (expected sha1 or sha256)")]
    UnknownDigest(String),

    #[error("rankballot: unable to load signing key: {0}")]
    SigningKey(#[source] rsa::errors::Error),

    #[error("rankballot: signing failed: {0}")]
    SigningFailure(#[source] rsa::errors::Error),

    #[error("rankballot: malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("rankballot: unable to load verification key: {0}")]
    VerificationKey(#[source] rsa::errors::Error),
}

/// Selection errors
///
/// These are reported back to the voter and never abort a selection session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid selection {0:?}: not a number")]
    InvalidToken(String),

    #[error("no such option: {value} (choose 1 to {max})")]
    OutOfRange { value: i32, max: usize },

    #[error("duplicate entry: option {0} is already ranked")]
    DuplicateEntry(usize),
}
