use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Tokens are signed with HS256 (HMAC with
/// SHA-256) and only HS256 tokens are ever accepted back.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// The header algorithm is checked against HS256 before the signature is
    /// looked at, so a token declaring `none`, an asymmetric algorithm or a
    /// different HMAC variant never reaches key verification.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, or undecodable header/payload
    /// * `InvalidSignature` - Unexpected algorithm or signature mismatch
    /// * `Expired` - `exp` is in the past
    /// * `MissingClaim` - `exp` is absent
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        if token.split('.').count() != 3 {
            return Err(JwtError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let header = decode_header(token).map_err(classify_header)?;
        if header.alg != self.algorithm {
            return Err(JwtError::InvalidSignature(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(classify)
    }
}

/// A header that is valid base64 but fails to deserialize names an
/// algorithm outside the supported set (`none` included).
fn classify_header(e: JsonWebTokenError) -> JwtError {
    match e.kind() {
        ErrorKind::Json(_) => JwtError::InvalidSignature(format!("unsupported header: {}", e)),
        _ => classify(e),
    }
}

fn classify(e: JsonWebTokenError) -> JwtError {
    match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat => JwtError::InvalidSignature(e.to_string()),
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        _ => JwtError::Malformed(e.to_string()),
    }
}
