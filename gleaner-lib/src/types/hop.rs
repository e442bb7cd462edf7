use std::fmt;
use std::str::FromStr;

/// How a link was discovered, tagged with the single-character code that
/// appears in crawl logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hop {
    /// A navigational link (`L`): an href the crawler may schedule as a
    /// page fetch of its own.
    Navlink,
    /// An embedded resource (`E`): something the referring page needs to
    /// render, like an image or a style sheet.
    Embed,
    /// A speculative link (`X`): a URI-like string found by heuristics in
    /// script code or unusual attributes.
    Speculative,
    /// A refer link (`R`): the target of a meta refresh redirect.
    Refer,
    /// An inferred link (`I`): built from another discovered URI by the
    /// implied-URI extractor.
    Inferred,
    /// A prerequisite (`P`): must be fetched before the referring document,
    /// e.g. a robots.txt or a DNS lookup.
    Prerequisite,
}

impl Hop {
    /// The single-character crawl-log code for this hop type.
    #[must_use]
    pub const fn hop_char(self) -> char {
        match self {
            Hop::Navlink => 'L',
            Hop::Embed => 'E',
            Hop::Speculative => 'X',
            Hop::Refer => 'R',
            Hop::Inferred => 'I',
            Hop::Prerequisite => 'P',
        }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hop_char())
    }
}

impl FromStr for Hop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Hop::Navlink),
            "E" => Ok(Hop::Embed),
            "X" => Ok(Hop::Speculative),
            "R" => Ok(Hop::Refer),
            "I" => Ok(Hop::Inferred),
            "P" => Ok(Hop::Prerequisite),
            other => Err(format!("unknown hop code `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_chars_are_unique() {
        let hops = [
            Hop::Navlink,
            Hop::Embed,
            Hop::Speculative,
            Hop::Refer,
            Hop::Inferred,
            Hop::Prerequisite,
        ];
        for hop in hops {
            assert_eq!(hop.to_string().parse::<Hop>(), Ok(hop));
        }
    }
}
