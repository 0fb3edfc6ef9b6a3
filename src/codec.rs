use std::sync::LazyLock;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Printable ASCII in the order digits, lowercase, uppercase, punctuation,
/// whitespace. Secret chunks are encoded over this alphabet as hex text.
pub const PRINTABLE: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

/// Lowercase hexadecimal, used to render share values.
pub const HEX: &[u8] = b"0123456789abcdef";

pub static SECRET_CODEC: LazyLock<Codec> = LazyLock::new(|| Codec::from_static(PRINTABLE));
pub static SHARE_CODEC: LazyLock<Codec> = LazyLock::new(|| Codec::from_static(HEX));

const NOT_IN_ALPHABET: u16 = u16::MAX;

/// Base conversion between strings over an ordered alphabet and integers.
///
/// Two numeral systems are offered. `encode`/`decode` use bijective
/// numeration (symbol `i` has digit value `i + 1`), so every string,
/// including ones starting with the first symbol and the empty string, maps
/// to exactly one integer and back. `render`/`parse` use the usual
/// positional numeral and are only defined on canonical strings.
#[derive(Debug, Clone)]
pub struct Codec {
    symbols: Vec<u8>,
    index: [u16; 256],
    radix: BigUint,
}

impl Codec {
    /// Builds a codec, rejecting alphabets with repeated symbols or fewer
    /// than two symbols.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.len() < 2 {
            return Err(Error::InvalidParameters(
                "an alphabet needs at least two symbols".to_string(),
            ));
        }

        let codec = Codec::from_static(symbols);

        for (i, symbol) in symbols.iter().enumerate() {
            if codec.index[*symbol as usize] as usize != i {
                return Err(Error::InvalidParameters(format!(
                    "symbol 0x{:02x} appears more than once in the alphabet",
                    symbol
                )));
            }
        }

        Ok(codec)
    }

    // later duplicates overwrite earlier ones, which `new` detects
    fn from_static(symbols: &[u8]) -> Self {
        let mut index = [NOT_IN_ALPHABET; 256];

        for (i, symbol) in symbols.iter().enumerate() {
            index[*symbol as usize] = i as u16;
        }

        Codec {
            symbols: symbols.to_vec(),
            index,
            radix: BigUint::from(symbols.len() as u64),
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    fn digit(&self, symbol: u8) -> Option<u32> {
        match self.index[symbol as usize] {
            NOT_IN_ALPHABET => None,
            i => Some(u32::from(i)),
        }
    }

    /// Maps a string over the alphabet to its bijective numeral value.
    pub fn encode(&self, bytes: &[u8]) -> Result<BigUint> {
        let mut value = BigUint::zero();

        for (position, byte) in bytes.iter().enumerate() {
            let digit = self.digit(*byte).ok_or(Error::Encoding {
                byte: *byte,
                position,
            })?;

            value = value * &self.radix + BigUint::from(digit + 1);
        }

        Ok(value)
    }

    /// Inverse of `encode`. Every integer decodes to exactly one string.
    pub fn decode(&self, value: &BigUint) -> Vec<u8> {
        let mut value = value.clone();
        let mut bytes = Vec::new();

        while !value.is_zero() {
            value -= 1_u32;

            let (quotient, remainder) = value.div_rem(&self.radix);

            bytes.push(self.symbols[Self::small(&remainder)]);
            value = quotient;
        }

        bytes.reverse();
        bytes
    }

    /// Canonical positional numeral of `value`.
    pub fn render(&self, value: &BigUint) -> String {
        if value.is_zero() {
            return (self.symbols[0] as char).to_string();
        }

        let mut value = value.clone();
        let mut digits = Vec::new();

        while !value.is_zero() {
            let (quotient, remainder) = value.div_rem(&self.radix);

            digits.push(self.symbols[Self::small(&remainder)] as char);
            value = quotient;
        }

        digits.iter().rev().collect()
    }

    /// Parses a canonical positional numeral. Empty input, leading zero
    /// symbols and foreign symbols are rejected.
    pub fn parse(&self, numeral: &str) -> Result<BigUint> {
        let bytes = numeral.as_bytes();

        if bytes.is_empty() {
            return Err(Error::Decode("empty numeral".to_string()));
        }

        if bytes.len() > 1 && bytes[0] == self.symbols[0] {
            return Err(Error::Decode(format!(
                "numeral {:?} has a leading zero symbol",
                numeral
            )));
        }

        let mut value = BigUint::zero();

        for byte in bytes {
            let digit = self.digit(*byte).ok_or_else(|| {
                Error::Decode(format!(
                    "numeral {:?} contains a symbol outside the alphabet",
                    numeral
                ))
            })?;

            value = value * &self.radix + BigUint::from(digit);
        }

        Ok(value)
    }

    // remainders are always below the radix, which is at most 256
    fn small(remainder: &BigUint) -> usize {
        remainder.to_usize().unwrap_or(0)
    }
}

/// Lowercase hex text of `bytes`, two symbols per byte. The result always
/// lies inside `PRINTABLE`, so any byte string can be encoded as a secret.
pub fn to_hex(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|byte| [HEX[usize::from(byte >> 4)], HEX[usize::from(byte & 0x0f)]])
        .collect()
}

/// Inverse of `to_hex`.
pub fn from_hex(text: &[u8]) -> Result<Vec<u8>> {
    if text.len() % 2 != 0 {
        return Err(Error::Decode(format!(
            "hex text has odd length {}",
            text.len()
        )));
    }

    text.chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            match (SHARE_CODEC.digit(pair[0]), SHARE_CODEC.digit(pair[1])) {
                (Some(high), Some(low)) => Ok((high << 4 | low) as u8),
                _ => Err(Error::Decode(format!(
                    "non-hex symbols at offset {}",
                    2 * i
                ))),
            }
        })
        .collect()
}
