use std::fmt;
use std::str::FromStr;

/// Policy for honoring robots directives during extraction.
///
/// Only the meta-robots part matters to the extractor: a `nofollow` or
/// `none` directive in a `<meta name="robots">` tag aborts link extraction
/// when the policy obeys it. Fetch-time robots.txt handling lives with the
/// crawler, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RobotsPolicy {
    /// Honor robots.txt and meta-robots directives.
    #[default]
    Obey,
    /// Honor robots.txt but ignore meta-robots directives.
    RobotsTxtOnly,
    /// Ignore all robots directives.
    Ignore,
}

impl RobotsPolicy {
    /// The policy names accepted on the command line.
    pub const STANDARD_POLICIES: [&'static str; 4] =
        ["obey", "classic", "robotsTxtOnly", "ignore"];

    /// Whether a `nofollow`/`none` meta-robots directive aborts link
    /// extraction for the document.
    #[must_use]
    pub const fn obeys_meta_robots_nofollow(self) -> bool {
        matches!(self, RobotsPolicy::Obey)
    }
}

impl fmt::Display for RobotsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RobotsPolicy::Obey => "obey",
            RobotsPolicy::RobotsTxtOnly => "robotsTxtOnly",
            RobotsPolicy::Ignore => "ignore",
        })
    }
}

impl FromStr for RobotsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "obey" | "classic" => Ok(RobotsPolicy::Obey),
            "robotstxtonly" => Ok(RobotsPolicy::RobotsTxtOnly),
            "ignore" => Ok(RobotsPolicy::Ignore),
            other => Err(format!(
                "unknown robots policy `{other}` (expected one of {:?})",
                RobotsPolicy::STANDARD_POLICIES
            )),
        }
    }
}
