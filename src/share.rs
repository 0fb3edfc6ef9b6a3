use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::codec::SHARE_CODEC;
use crate::error::{Error, Result};

const SEPARATOR: char = '-';

/// One point of a chunk's polynomial.
///
/// Rendered as the token `<x>-<y>` stored in `keysplit-v1` artifacts, both
/// canonical lowercase hex numerals, e.g. `2-9f03c1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub x: u32,
    pub y: BigUint,
}

impl Share {
    pub fn new(x: u32, y: BigUint) -> Self {
        Share { x, y }
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            SHARE_CODEC.render(&BigUint::from(self.x)),
            SEPARATOR,
            SHARE_CODEC.render(&self.y)
        )
    }
}

impl FromStr for Share {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let (x, y) = token
            .split_once(SEPARATOR)
            .ok_or_else(|| Error::Decode(format!("share token {:?} has no separator", token)))?;

        let x = SHARE_CODEC
            .parse(x)?
            .to_u32()
            .filter(|x| *x != 0)
            .ok_or_else(|| {
                Error::Decode(format!("share token {:?} has an invalid x-coordinate", token))
            })?;
        let y = SHARE_CODEC.parse(y)?;

        Ok(Share { x, y })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::Share;
    use crate::error::Error;

    #[test]
    fn test_render_token() {
        let share = Share::new(3, BigUint::from(0x9f03c1_u32));

        assert_eq!(share.to_string(), "3-9f03c1");
        assert_eq!(Share::new(17, BigUint::from(0_u32)).to_string(), "11-0");
    }

    #[test]
    fn test_parse_token() {
        let share: Share = "a-ff".parse().unwrap();

        assert_eq!(share, Share::new(10, BigUint::from(255_u32)));
        assert_eq!("3-9f03c1".parse::<Share>().unwrap().to_string(), "3-9f03c1");
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        let malformed = [
            "",
            "3",
            "3-",
            "-ff",
            "0-ff",
            "03-ff",
            "3-0ff",
            "3-FF",
            "3-ff-1",
            "3 - ff",
            "'3-ff'",
            "100000000-1",
        ];

        for token in malformed.iter() {
            assert!(
                matches!(token.parse::<Share>(), Err(Error::Decode(_))),
                "token {:?} should not parse",
                token
            );
        }
    }
}
