use clap::Parser;
use gleaner_lib::RobotsPolicy;

/// Fetch a URL and print the outlinks its HTML references, one
/// `target HOP context` line per link.
#[derive(Debug, Parser)]
#[command(name = "gleaner", version, about = "Extracts and prints links from the given URL")]
pub(crate) struct Options {
    /// Policy for robots meta tags (obey, classic, robotsTxtOnly, ignore)
    #[arg(long, default_value_t = RobotsPolicy::Obey)]
    pub(crate) robots: RobotsPolicy,

    /// The URL to fetch and extract links from
    pub(crate) url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robots_policy_is_parsed() {
        let options = Options::parse_from(["gleaner", "--robots", "ignore", "http://h/"]);
        assert_eq!(options.robots, RobotsPolicy::Ignore);
        assert_eq!(options.url, "http://h/");
    }

    #[test]
    fn robots_policy_defaults_to_obey() {
        let options = Options::parse_from(["gleaner", "http://h/"]);
        assert_eq!(options.robots, RobotsPolicy::Obey);
    }

    #[test]
    fn url_is_required() {
        assert!(Options::try_parse_from(["gleaner"]).is_err());
    }
}
