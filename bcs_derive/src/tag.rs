//! Grammar of `#[bcs = "..."]` tag strings
//!
//! A tag string is a comma-separated list of tokens. Surrounding whitespace
//! and empty tokens are ignored, so `""` and `" , "` both describe a plain
//! field. The token `-` excludes the field from the wire and short-circuits:
//! nothing after it is examined.

use std::fmt;

/// Wire treatment of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldTag {
    Normal,
    /// Written as a presence byte followed by the value, if present.
    Optional,
    /// Never written; decodes as `Default::default()`.
    Ignored,
}

/// Treatment of a whole type, given by a tag on the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerTag {
    Record,
    /// A struct of optional slots that is written as a tagged union.
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bcs tag `{}`", self.0)
    }
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|tok| !tok.is_empty())
}

impl FieldTag {
    pub(crate) fn parse(s: &str) -> Result<Self, UnknownTag> {
        let mut optional = false;
        for tok in tokens(s) {
            match tok {
                "-" => return Ok(Self::Ignored),
                "optional" => optional = true,
                other => return Err(UnknownTag(other.to_owned())),
            }
        }
        Ok(if optional { Self::Optional } else { Self::Normal })
    }
}

impl ContainerTag {
    pub(crate) fn parse(s: &str) -> Result<Self, UnknownTag> {
        let mut ret = Self::Record;
        for tok in tokens(s) {
            match tok {
                "enum" => ret = Self::Enum,
                other => return Err(UnknownTag(other.to_owned())),
            }
        }
        Ok(ret)
    }
}
