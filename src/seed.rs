use sha2::{Digest as _, Sha256};

/// Derives the 32-bit shape seed from the prompt text.
///
/// The hash is content-based (SHA-256 over the UTF-8 bytes, leading eight
/// bytes reduced modulo 2^32) so the same prompt yields the same seed on any
/// platform and in any process. Never keyed by object identity.
pub fn derive_seed(prompt: &str) -> u32 {
    let digest = Sha256::digest(prompt.as_bytes());
    let mut lead = [0u8; 8];
    lead.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(lead) % (1u64 << 32)) as u32
}
