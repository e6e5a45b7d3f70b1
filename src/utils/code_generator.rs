//! Short code generation.
//!
//! Codes are drawn from the OS entropy source and mapped onto an alphabet of
//! letters and digits with the visually confusable characters removed, so a
//! code read aloud or copied by hand stays unambiguous.

use crate::domain::error::LinkError;

/// Characters a generated code may contain.
///
/// `0 O o 1 l I` are excluded.
pub const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz";

/// Default generated code length.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Accepted range for configured code lengths.
pub const MIN_CODE_LENGTH: usize = 7;
pub const MAX_CODE_LENGTH: usize = 14;

/// Largest byte value that maps uniformly onto [`ALPHABET`].
const REJECTION_LIMIT: u8 = (256 - 256 % ALPHABET.len()) as u8 - 1;

/// Source of fresh short codes.
///
/// Implementations are pure with respect to storage: they never check
/// whether a code is taken. The caller inserts and retries on
/// [`LinkError::DuplicateCode`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a new code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::GeneratorUnavailable`] when no entropy can be read.
    fn generate(&self) -> Result<String, LinkError>;
}

/// Generator backed by `getrandom`.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// The length is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, LinkError> {
        let mut code = String::with_capacity(self.length);
        // Twice the length covers the expected rejections in one read.
        let mut buffer = vec![0u8; self.length * 2];

        while code.len() < self.length {
            getrandom::fill(&mut buffer)
                .map_err(|e| LinkError::GeneratorUnavailable(e.to_string()))?;

            for &byte in &buffer {
                if byte > REJECTION_LIMIT {
                    continue;
                }
                code.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
                if code.len() == self.length {
                    break;
                }
            }
        }

        Ok(code)
    }
}
