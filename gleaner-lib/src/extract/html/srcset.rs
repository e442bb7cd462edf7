//! Multi-URL attribute parsing for the `srcset` family.
//!
//! A srcset value is a comma-separated list of image candidate strings:
//! a URL, optionally followed by whitespace and a condition descriptor.
//! URLs in the wild contain bare commas (which should be percent-encoded
//! but often are not), and descriptors may contain commas inside
//! parentheses, so a simple split on `,` is not enough. Malformed tails
//! are dropped rather than failing the whole value: lazy-loading markup
//! mangles these attributes routinely.

enum DescriptorState {
    Inside,
    After,
    Parens,
}

/// Split `input` at the first character for which the predicate fails,
/// returning the matching prefix and the rest.
fn split_at<F>(input: &str, predicate: F) -> (&str, &str)
where
    F: Fn(char) -> bool,
{
    for (i, ch) in input.char_indices() {
        if !predicate(ch) {
            return input.split_at(i);
        }
    }
    (input, "")
}

/// Parse a srcset-style value into its candidate URLs, in document order.
pub(crate) fn parse(input: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    let mut remaining = input;
    while !remaining.is_empty() {
        let (rest, url) = parse_candidate(remaining);
        if let Some(url) = url {
            urls.push(url);
        }
        remaining = rest;
    }
    urls
}

/// Consume one image candidate: leading whitespace and commas, the URL,
/// then any descriptor up to the next separating comma.
fn parse_candidate(remaining: &str) -> (&str, Option<&str>) {
    let (_, remaining) = split_at(remaining, |c| c == ',' || c.is_ascii_whitespace());
    if remaining.is_empty() {
        return ("", None);
    }

    let (url, remaining) = split_at(remaining, |c| !c.is_ascii_whitespace());
    // A candidate's trailing commas separate it from the next one; they are
    // never part of the URL itself.
    let url = url.trim_end_matches(',');

    let (_, remaining) = split_at(remaining, |c| c.is_ascii_whitespace());
    let remaining = skip_descriptor(remaining);

    (remaining, (!url.is_empty()).then_some(url))
}

/// Skip a condition descriptor, honoring parenthesized sections that may
/// contain commas. Returns the input after the next separating comma, or
/// an empty string when the value ends inside the descriptor.
fn skip_descriptor(remaining: &str) -> &str {
    let mut state = DescriptorState::Inside;
    for (i, c) in remaining.char_indices() {
        match state {
            DescriptorState::Inside => match c {
                c if c.is_ascii_whitespace() => state = DescriptorState::After,
                '(' => state = DescriptorState::Parens,
                ',' => return &remaining[i + c.len_utf8()..],
                _ => (),
            },
            DescriptorState::Parens => {
                if c == ')' {
                    state = DescriptorState::Inside;
                }
            }
            DescriptorState::After => {
                if !c.is_ascii_whitespace() {
                    state = DescriptorState::Inside;
                }
            }
        }
    }
    ""
}
