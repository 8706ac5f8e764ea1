//! Reversible short code encoding.
//!
//! Implements the Hashids algorithm: a counter value is written in a
//! salt-shuffled alphabet, prefixed with a "lottery" character and padded with
//! guard characters and alphabet halves up to the configured minimum length.
//! Codes produced here are interchangeable with any other Hashids
//! implementation configured with the same salt, minimum length and alphabet.
//!
//! # Example
//!
//! ```
//! use shorturls::utils::code_encoder::CodeEncoder;
//!
//! let encoder = CodeEncoder::new("this is my salt", 0).unwrap();
//! assert_eq!(encoder.encode(12345), "NkK9");
//! assert_eq!(encoder.decode("NkK9").unwrap(), 12345);
//! ```

/// Default alphabet: ASCII letters and digits only, so codes never need escaping.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

const DEFAULT_SEPARATORS: &str = "cfhistuCFHISTU";
const MIN_ALPHABET_LENGTH: usize = 16;
const SEPARATOR_DIV: f64 = 3.5;
const GUARD_DIV: f64 = 12.0;

/// Errors produced while configuring the encoder or decoding a code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncoderError {
    #[error("Alphabet must contain at least 16 unique characters, got {0}")]
    AlphabetTooShort(usize),

    #[error("Alphabet may only contain ASCII letters and digits, found {0:?}")]
    InvalidAlphabetCharacter(char),

    #[error("Invalid code: {0:?}")]
    InvalidCode(String),
}

/// Salted, reversible `u64 <-> String` encoder.
///
/// Cheap to clone; all derived tables are computed once in the constructor.
#[derive(Debug, Clone)]
pub struct CodeEncoder {
    salt: Vec<u8>,
    min_length: usize,
    alphabet: Vec<u8>,
    separators: Vec<u8>,
    guards: Vec<u8>,
}

impl CodeEncoder {
    /// Creates an encoder over [`DEFAULT_ALPHABET`].
    pub fn new(salt: &str, min_length: usize) -> Result<Self, EncoderError> {
        Self::with_alphabet(salt, min_length, DEFAULT_ALPHABET)
    }

    /// Creates an encoder over a custom alphabet.
    ///
    /// Duplicate characters are dropped.
    ///
    /// # Errors
    ///
    /// - [`EncoderError::InvalidAlphabetCharacter`] for anything that is not an ASCII letter or digit
    /// - [`EncoderError::AlphabetTooShort`] when fewer than 16 unique characters remain
    pub fn with_alphabet(
        salt: &str,
        min_length: usize,
        alphabet: &str,
    ) -> Result<Self, EncoderError> {
        let mut unique: Vec<u8> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(EncoderError::InvalidAlphabetCharacter(c));
            }
            let b = c as u8;
            if !unique.contains(&b) {
                unique.push(b);
            }
        }

        if unique.len() < MIN_ALPHABET_LENGTH {
            return Err(EncoderError::AlphabetTooShort(unique.len()));
        }

        let salt = salt.as_bytes().to_vec();

        let mut separators: Vec<u8> = DEFAULT_SEPARATORS
            .bytes()
            .filter(|b| unique.contains(b))
            .collect();
        let mut alphabet: Vec<u8> = unique
            .into_iter()
            .filter(|b| !separators.contains(b))
            .collect();

        consistent_shuffle(&mut separators, &salt);

        if separators.is_empty() || alphabet.len() as f64 / separators.len() as f64 > SEPARATOR_DIV
        {
            let mut separators_len = (alphabet.len() as f64 / SEPARATOR_DIV).ceil() as usize;
            if separators_len == 1 {
                separators_len += 1;
            }

            if separators_len > separators.len() {
                let diff = separators_len - separators.len();
                separators.extend(alphabet.drain(..diff));
            } else {
                separators.truncate(separators_len);
            }
        }

        consistent_shuffle(&mut alphabet, &salt);

        let guard_count = (alphabet.len() as f64 / GUARD_DIV).ceil() as usize;
        let guards: Vec<u8> = if alphabet.len() < 3 {
            separators.drain(..guard_count).collect()
        } else {
            alphabet.drain(..guard_count).collect()
        };

        Ok(Self {
            salt,
            min_length,
            alphabet,
            separators,
            guards,
        })
    }

    /// Minimum length of every produced code.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Returns `true` if `c` can appear in a code produced by this encoder.
    pub fn is_code_char(&self, c: char) -> bool {
        c.is_ascii()
            && [&self.alphabet, &self.separators, &self.guards]
                .iter()
                .any(|set| set.contains(&(c as u8)))
    }

    /// Encodes a single value. Deterministic for a given configuration.
    pub fn encode(&self, value: u64) -> String {
        self.encode_numbers(&[value])
    }

    /// Decodes a code produced by [`Self::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidCode`] if the code was not produced by an
    /// encoder with this exact salt, minimum length and alphabet.
    pub fn decode(&self, code: &str) -> Result<u64, EncoderError> {
        let invalid = || EncoderError::InvalidCode(code.to_string());

        let numbers = self.decode_numbers(code).ok_or_else(invalid)?;
        let [value] = numbers.as_slice() else {
            return Err(invalid());
        };

        // Anything that does not re-encode to the same string was not ours.
        if self.encode(*value) != code {
            return Err(invalid());
        }

        Ok(*value)
    }

    fn encode_numbers(&self, numbers: &[u64]) -> String {
        let mut alphabet = self.alphabet.clone();

        let numbers_id: u64 = numbers
            .iter()
            .enumerate()
            .map(|(i, n)| n % (i as u64 + 100))
            .sum();

        let lottery = alphabet[(numbers_id % alphabet.len() as u64) as usize];
        let mut ret = vec![lottery];

        for (i, &number) in numbers.iter().enumerate() {
            shuffle_for_number(&mut alphabet, lottery, &self.salt);

            let last = to_alphabet(number, &alphabet);
            ret.extend_from_slice(&last);

            if i + 1 < numbers.len() {
                let n = number % (last[0] as u64 + i as u64);
                let index = (n % self.separators.len() as u64) as usize;
                ret.push(self.separators[index]);
            }
        }

        if ret.len() < self.min_length {
            let index = ((numbers_id + ret[0] as u64) % self.guards.len() as u64) as usize;
            ret.insert(0, self.guards[index]);

            if ret.len() < self.min_length {
                let index = ((numbers_id + ret[2] as u64) % self.guards.len() as u64) as usize;
                ret.push(self.guards[index]);
            }
        }

        let half = alphabet.len() / 2;
        while ret.len() < self.min_length {
            let key = alphabet.clone();
            consistent_shuffle(&mut alphabet, &key);

            let mut padded = Vec::with_capacity(ret.len() + alphabet.len());
            padded.extend_from_slice(&alphabet[half..]);
            padded.extend_from_slice(&ret);
            padded.extend_from_slice(&alphabet[..half]);
            ret = padded;

            let excess = ret.len().saturating_sub(self.min_length);
            if excess > 0 {
                let start = excess / 2;
                ret = ret[start..start + self.min_length].to_vec();
            }
        }

        ret.into_iter().map(char::from).collect()
    }

    fn decode_numbers(&self, code: &str) -> Option<Vec<u64>> {
        let bytes = code.as_bytes();

        let parts: Vec<&[u8]> = bytes.split(|b| self.guards.contains(b)).collect();
        let index = if parts.len() == 2 || parts.len() == 3 {
            1
        } else {
            0
        };

        let (&lottery, rest) = parts[index].split_first()?;

        let mut alphabet = self.alphabet.clone();
        let mut numbers = Vec::new();
        for chunk in rest.split(|b| self.separators.contains(b)) {
            shuffle_for_number(&mut alphabet, lottery, &self.salt);
            numbers.push(from_alphabet(chunk, &alphabet)?);
        }

        Some(numbers)
    }
}

/// Re-shuffles the working alphabet before each number, keyed by
/// `lottery + salt + alphabet` truncated to the alphabet length.
fn shuffle_for_number(alphabet: &mut [u8], lottery: u8, salt: &[u8]) {
    let mut key = Vec::with_capacity(1 + salt.len() + alphabet.len());
    key.push(lottery);
    key.extend_from_slice(salt);
    key.extend_from_slice(alphabet);
    key.truncate(alphabet.len());

    consistent_shuffle(alphabet, &key);
}

fn consistent_shuffle(alphabet: &mut [u8], salt: &[u8]) {
    if salt.is_empty() {
        return;
    }

    let mut v = 0usize;
    let mut p = 0usize;
    for i in (1..alphabet.len()).rev() {
        v %= salt.len();
        let integer = salt[v] as usize;
        p += integer;
        let j = (integer + v + p) % i;
        alphabet.swap(i, j);
        v += 1;
    }
}

fn to_alphabet(mut value: u64, alphabet: &[u8]) -> Vec<u8> {
    let base = alphabet.len() as u64;
    let mut out = Vec::new();

    loop {
        out.push(alphabet[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }

    out.reverse();
    out
}

fn from_alphabet(input: &[u8], alphabet: &[u8]) -> Option<u64> {
    let base = alphabet.len() as u64;

    input.iter().try_fold(0u64, |acc, c| {
        let pos = alphabet.iter().position(|a| a == c)? as u64;
        acc.checked_mul(base)?.checked_add(pos)
    })
}
