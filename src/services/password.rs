/// Salted one-way password hashing (bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Every call draws a fresh salt, so the same plaintext yields different digests.
    pub fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// A malformed digest is reported as a mismatch, never as an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "stored password digest could not be parsed");
                false
            }
        }
    }
}
