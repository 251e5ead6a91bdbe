use crate::*;
use digest::Digest;
use rsa::hash::Hash as RsaHash;
use rsa::{PaddingScheme, RSAPrivateKey};
use std::str::FromStr;

/// Digest used by the RSASSA-PKCS1-v1_5 signature.
///
/// `Sha1` matches existing `SHA1withRSA` verifiers. The artifact does not record
/// which digest was used, so signer and verifier have to agree out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// Hash a payload with this digest
    pub fn digest(&self, payload: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha1 => sha1::Sha1::digest(payload).to_vec(),
            DigestAlgorithm::Sha256 => sha2::Sha256::digest(payload).to_vec(),
        }
    }

    pub(crate) fn padding(&self) -> PaddingScheme {
        let hash = match self {
            DigestAlgorithm::Sha1 => RsaHash::SHA1,
            DigestAlgorithm::Sha256 => RsaHash::SHA2_256,
        };
        PaddingScheme::new_pkcs1v15_sign(Some(hash))
    }
}

impl Default for DigestAlgorithm {
    fn default() -> Self {
        DigestAlgorithm::Sha1
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(DigestAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(Error::UnknownDigest(s.to_owned())),
        }
    }
}

/// Anything that can produce a signature over a canonical payload
pub trait BallotSigner {
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, Error>;

    fn digest(&self) -> DigestAlgorithm;
}

/// An RSA private key used to sign ballots
pub struct RsaSigningKey {
    key: RSAPrivateKey,
    digest: DigestAlgorithm,
}

impl RsaSigningKey {
    /// Parse a PKCS#8 DER-encoded RSA private key.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, Error> {
        let key = RSAPrivateKey::from_pkcs8(der).map_err(Error::SigningKey)?;
        key.validate().map_err(Error::SigningKey)?;

        Ok(RsaSigningKey {
            key,
            digest: DigestAlgorithm::default(),
        })
    }

    /// Use a different digest for signatures made with this key.
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }
}

impl BallotSigner for RsaSigningKey {
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, Error> {
        let hashed = self.digest.digest(payload);
        self.key
            .sign(self.digest.padding(), &hashed)
            .map_err(Error::SigningFailure)
    }

    fn digest(&self) -> DigestAlgorithm {
        self.digest
    }
}

impl std::fmt::Debug for RsaSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RsaSigningKey")
            .field("digest", &self.digest)
            .finish()
    }
}

/// Sign a canonical payload, producing the artifact that gets persisted.
pub fn sign<S, D>(payload: &[u8], signer: &S, diagnostics: &D) -> Result<SignedArtifact, Error>
where
    S: BallotSigner + ?Sized,
    D: Diagnostics + ?Sized,
{
    let signature = signer.sign(payload)?;

    diagnostics.report(&Event::PayloadSigned {
        payload_len: payload.len(),
        digest: signer.digest(),
    });

    Ok(SignedArtifact::new(payload.to_vec(), signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOTER_PRIVATE: &[u8] = include_bytes!("../fixtures/voter_private.der");
    const VOTER_PUBLIC: &[u8] = include_bytes!("../fixtures/voter_public.der");

    #[test]
    fn test_digest_names() {
        assert_eq!("sha1".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!("SHA-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert!(matches!(
            "md5".parse::<DigestAlgorithm>(),
            Err(Error::UnknownDigest(_))
        ));
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha1);
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "sha256");
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(DigestAlgorithm::Sha1.digest(b"abc").len(), 20);
        assert_eq!(DigestAlgorithm::Sha256.digest(b"abc").len(), 32);
    }

    #[test]
    fn test_bad_private_key() {
        assert!(matches!(
            RsaSigningKey::from_pkcs8_der(b"not a key"),
            Err(Error::SigningKey(_))
        ));
        // A public key is not a private key
        assert!(matches!(
            RsaSigningKey::from_pkcs8_der(VOTER_PUBLIC),
            Err(Error::SigningKey(_))
        ));
    }

    #[test]
    fn test_signature_is_key_sized_and_deterministic() {
        let key = RsaSigningKey::from_pkcs8_der(VOTER_PRIVATE).unwrap();

        let first = key.sign(b"Option1Option2Option3").unwrap();
        let second = key.sign(b"Option1Option2Option3").unwrap();
        assert_eq!(first.len(), 128);
        assert_eq!(first, second);

        let other = key.sign(b"Option1Option3Option2").unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_sign_reports_event() {
        let key = RsaSigningKey::from_pkcs8_der(VOTER_PRIVATE)
            .unwrap()
            .with_digest(DigestAlgorithm::Sha256);
        let diagnostics = MemoryDiagnostics::new();

        let artifact = sign(b"payload", &key, &diagnostics).unwrap();

        assert_eq!(artifact.payload(), b"payload");
        assert_eq!(
            diagnostics.events(),
            vec![Event::PayloadSigned {
                payload_len: 7,
                digest: DigestAlgorithm::Sha256
            }]
        );
    }
}
