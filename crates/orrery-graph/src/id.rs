//! Hash-based topic ID generation.
//!
//! Creates collision-resistant topic IDs using SHA256 and base36 encoding.
//!
//! # Features
//!
//! - **Adaptive length**: ID length grows with graph size (4-6 characters)
//! - **Collision resistant**: SHA256 hashing with nonce retry
//! - **Deterministic**: IDs derive from the topic name and its creation
//!   ordinal, so re-parsing the same syllabus yields the same IDs
//! - **Format**: `{prefix}-{hash}` (e.g., "topic-a3f8")
//!
//! # Example
//!
//! ```
//! use orrery_graph::id::{IdGeneratorConfig, TopicIdGenerator};
//!
//! let mut generator = TopicIdGenerator::new(IdGeneratorConfig {
//!     prefix: "topic".to_string(),
//!     graph_size: 0,
//! });
//!
//! let id = generator.generate("Rust Basics").unwrap();
//! assert!(id.0.starts_with("topic-"));
//! ```

use crate::domain::TopicId;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_NONCE: u32 = 100;

/// Errors that can occur during ID generation
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Unable to generate a unique ID after exhausting all nonces and length increases
    #[error("Unable to generate unique ID after {attempts} attempts")]
    CollisionExhausted {
        /// How many candidate IDs were tried before giving up.
        attempts: u32,
    },

    /// Base36 encoding failed
    #[error("Base36 encoding failed: {0}")]
    EncodingFailed(String),

    /// Invalid length parameter
    #[error("Length must be greater than 0")]
    InvalidLength,
}

/// Configuration for ID generation
#[derive(Debug, Clone)]
pub struct IdGeneratorConfig {
    /// Prefix for all IDs (e.g., "topic")
    pub prefix: String,

    /// Current number of topics in the graph (affects adaptive length)
    pub graph_size: usize,
}

impl Default for IdGeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: "topic".to_string(),
            graph_size: 0,
        }
    }
}

/// Hash-based topic ID generator with collision detection.
///
/// Tracks every ID it has issued (plus any registered via
/// [`register_id`](Self::register_id)) so repeated names within one parse
/// cannot collide. Create one generator per parse.
#[derive(Debug)]
pub struct TopicIdGenerator {
    config: IdGeneratorConfig,
    existing_ids: HashSet<String>,
    counter: u64,
}

impl TopicIdGenerator {
    /// Create a new ID generator with the given configuration
    pub fn new(config: IdGeneratorConfig) -> Self {
        Self {
            config,
            existing_ids: HashSet::new(),
            counter: 0,
        }
    }

    /// Register an existing ID to prevent collisions
    pub fn register_id(&mut self, id: String) {
        self.existing_ids.insert(id);
    }

    /// Generate a unique ID for a topic name.
    ///
    /// The hash input is the name plus this generator's creation ordinal,
    /// so the same syllabus parsed twice produces identical IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if unable to generate a unique ID after trying all
    /// nonces at the maximum length.
    pub fn generate(&mut self, name: &str) -> Result<TopicId, IdGenerationError> {
        let ordinal = self.counter;
        self.counter += 1;

        let id_length = self.adaptive_length();

        for nonce in 0..MAX_NONCE {
            let id = self.generate_hash_id(name, ordinal, nonce, id_length)?;

            if !self.existing_ids.contains(&id) {
                if nonce > 0 {
                    debug!(
                        nonce,
                        id_length, "Generated unique ID after {} collision retries", nonce
                    );
                }
                self.existing_ids.insert(id.clone());
                return Ok(TopicId::new(id));
            }
        }

        // If all nonces collide, try with increased length
        if id_length < 6 {
            warn!(
                id_length,
                max_nonce = MAX_NONCE,
                "All nonces exhausted, increasing ID length to {}",
                id_length + 1
            );
            let longer_id = self.generate_hash_id(name, ordinal, 0, id_length + 1)?;
            self.existing_ids.insert(longer_id.clone());
            return Ok(TopicId::new(longer_id));
        }

        Err(IdGenerationError::CollisionExhausted {
            attempts: MAX_NONCE,
        })
    }

    /// Generate a hash-based ID with the given parameters
    fn generate_hash_id(
        &self,
        name: &str,
        ordinal: u64,
        nonce: u32,
        length: usize,
    ) -> Result<String, IdGenerationError> {
        let content = format!("{}|{}|{}", name, ordinal, nonce);

        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let hash_bytes = hasher.finalize();

        let hash_str = encode_base36(&hash_bytes[..8], length)?;

        Ok(format!("{}-{}", self.config.prefix, hash_str))
    }

    /// Determine ID length based on graph size
    ///
    /// - 0-500 topics: 4 chars
    /// - 500-1,500: 5 chars
    /// - 1,500+: 6 chars
    fn adaptive_length(&self) -> usize {
        match self.config.graph_size {
            0..=500 => 4,
            501..=1500 => 5,
            _ => 6,
        }
    }
}

impl Default for TopicIdGenerator {
    fn default() -> Self {
        Self::new(IdGeneratorConfig::default())
    }
}

/// Encode bytes as base36 string
///
/// # Bounds Checking
///
/// Uses wrapping arithmetic to fold the input bytes into a u64. The caller
/// passes at most the first 8 bytes of the SHA256 hash, so wrapping keeps
/// the fold deterministic rather than guarding against a real overflow.
///
/// # Errors
///
/// Returns an error if length is 0 or if UTF-8 conversion fails.
fn encode_base36(bytes: &[u8], length: usize) -> Result<String, IdGenerationError> {
    if length == 0 {
        return Err(IdGenerationError::InvalidLength);
    }

    let mut num: u64 = 0;
    for &byte in bytes {
        num = num.wrapping_shl(8).wrapping_add(u64::from(byte));
    }

    let mut result = Vec::new();
    let mut n = num;

    while result.len() < length {
        let remainder = (n % 36) as usize;
        result.push(BASE36_CHARS[remainder]);
        n /= 36;
    }

    result.reverse();

    String::from_utf8(result)
        .map_err(|e| IdGenerationError::EncodingFailed(format!("UTF-8 conversion failed: {}", e)))
}
