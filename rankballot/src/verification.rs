use crate::*;
use rsa::{PublicKey, RSAPublicKey};

/// Anything that can check a signature over a canonical payload
pub trait BallotVerifier {
    /// A signature that does not match is `false`, never an error.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> bool;

    fn digest(&self) -> DigestAlgorithm;
}

/// An RSA public key used to check signed ballots
#[derive(Debug, Clone)]
pub struct RsaVerifyingKey {
    key: RSAPublicKey,
    digest: DigestAlgorithm,
}

impl RsaVerifyingKey {
    /// Parse an X.509 SubjectPublicKeyInfo DER-encoded RSA public key.
    pub fn from_x509_der(der: &[u8]) -> Result<Self, Error> {
        let key = RSAPublicKey::from_pkcs8(der).map_err(Error::VerificationKey)?;

        Ok(RsaVerifyingKey {
            key,
            digest: DigestAlgorithm::default(),
        })
    }

    /// Expect signatures made with a different digest.
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }
}

impl BallotVerifier for RsaVerifyingKey {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> bool {
        let hashed = self.digest.digest(payload);
        self.key
            .verify(self.digest.padding(), &hashed, signature)
            .is_ok()
    }

    fn digest(&self) -> DigestAlgorithm {
        self.digest
    }
}

/// Parse an artifact and check its signature.
///
/// Fails only when the artifact itself cannot be read; a signature that does not
/// match the payload is a normal `Ok(false)`.
pub fn verify<V, D>(artifact: &str, verifier: &V, diagnostics: &D) -> Result<bool, Error>
where
    V: BallotVerifier + ?Sized,
    D: Diagnostics + ?Sized,
{
    let artifact = SignedArtifact::parse(artifact)?;
    let valid = artifact.verify_signature(verifier);

    diagnostics.report(&Event::ArtifactVerified {
        valid,
        digest: verifier.digest(),
    });

    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOTER_PRIVATE: &[u8] = include_bytes!("../fixtures/voter_private.der");
    const VOTER_PUBLIC: &[u8] = include_bytes!("../fixtures/voter_public.der");
    const OTHER_PUBLIC: &[u8] = include_bytes!("../fixtures/other_public.der");
    const BALLOT_SHA1: &str = include_str!("../fixtures/ballot_sha1.txt");
    const BALLOT_SHA256: &str = include_str!("../fixtures/ballot_sha256.txt");

    fn voter_public() -> RsaVerifyingKey {
        RsaVerifyingKey::from_x509_der(VOTER_PUBLIC).unwrap()
    }

    #[test]
    fn test_bad_public_key() {
        assert!(matches!(
            RsaVerifyingKey::from_x509_der(b"garbage"),
            Err(Error::VerificationKey(_))
        ));
        assert!(matches!(
            RsaVerifyingKey::from_x509_der(VOTER_PRIVATE),
            Err(Error::VerificationKey(_))
        ));
    }

    #[test]
    fn test_reference_artifacts_verify() {
        assert!(verify(BALLOT_SHA1, &voter_public(), &()).unwrap());

        let sha256 = voter_public().with_digest(DigestAlgorithm::Sha256);
        assert!(verify(BALLOT_SHA256, &sha256, &()).unwrap());
    }

    #[test]
    fn test_digest_must_match() {
        assert!(!verify(BALLOT_SHA256, &voter_public(), &()).unwrap());

        let sha256 = voter_public().with_digest(DigestAlgorithm::Sha256);
        assert!(!verify(BALLOT_SHA1, &sha256, &()).unwrap());
    }

    #[test]
    fn test_other_key_does_not_verify() {
        let other = RsaVerifyingKey::from_x509_der(OTHER_PUBLIC).unwrap();
        assert!(!verify(BALLOT_SHA1, &other, &()).unwrap());
    }

    #[test]
    fn test_altered_payload_does_not_verify() {
        let altered = BALLOT_SHA1.replacen("Option1Option2", "Option2Option1", 1);
        assert!(!verify(&altered, &voter_public(), &()).unwrap());
    }

    #[test]
    fn test_truncated_signature_does_not_verify() {
        let artifact = SignedArtifact::parse(BALLOT_SHA1).unwrap();
        let truncated = &artifact.signature()[1..];
        assert!(!voter_public().verify(artifact.payload(), truncated));
        assert!(!voter_public().verify(artifact.payload(), &[]));
    }

    #[test]
    fn test_malformed_artifact_is_an_error() {
        assert!(matches!(
            verify("Option1Option2Option3", &voter_public(), &()),
            Err(Error::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_verify_reports_event() {
        let diagnostics = MemoryDiagnostics::new();
        verify(BALLOT_SHA1, &voter_public(), &diagnostics).unwrap();

        assert_eq!(
            diagnostics.events(),
            vec![Event::ArtifactVerified {
                valid: true,
                digest: DigestAlgorithm::Sha1
            }]
        );
    }
}
