use crate::lines::Lines;
use crate::*;
use std::str::FromStr;

/// A canonical payload together with its signature.
///
/// On disk this is two logical parts joined by a newline: the payload as text,
/// then the base64 (standard alphabet) signature. No trailing newline is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedArtifact {
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl SignedArtifact {
    pub fn new(payload: Vec<u8>, signature: Vec<u8>) -> Self {
        SignedArtifact { payload, signature }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Pack into the artifact text format
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoded = base64::encode(&self.signature);

        let mut bytes = Vec::with_capacity(self.payload.len() + 1 + encoded.len());
        bytes.extend_from_slice(&self.payload);
        bytes.push(b'\n');
        bytes.extend_from_slice(encoded.as_bytes());
        bytes
    }

    /// Unpack from the artifact text format.
    ///
    /// The first line is the payload. Every remaining line belongs to the signature:
    /// they are joined without separators and trimmed before base64 decoding. Lines
    /// end the same way catalog lines do.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut lines = Lines::new(text.as_bytes());

        let payload = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(Error::MalformedArtifact(
                    "expected a payload line followed by a signature".into(),
                ))
            }
        };

        let encoded = lines.collect::<Result<String, _>>()?;
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(Error::MalformedArtifact("missing signature".into()));
        }

        let signature = base64::decode(encoded)
            .map_err(|e| Error::MalformedArtifact(format!("invalid base64 signature: {}", e)))?;

        Ok(SignedArtifact {
            payload: payload.into_bytes(),
            signature,
        })
    }

    /// Check the signature against the payload.
    ///
    /// `false` means the artifact was altered or signed by someone else.
    pub fn verify_signature<V>(&self, verifier: &V) -> bool
    where
        V: BallotVerifier + ?Sized,
    {
        verifier.verify(&self.payload, &self.signature)
    }
}

impl FromStr for SignedArtifact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignedArtifact::parse(s)
    }
}
