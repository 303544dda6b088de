// Backtracking matcher. `find` is the sole public operation; everything
// else is a continuation-passing implementation detail.
//
// Each node match is handed a success continuation, a closure
// representing "the rest of the pattern from here", instead of
// returning a materialized list of (end, captures) possibilities. It is
// a direct generalization of a flat token-list matcher's `tokens[1..]`
// "rest of the pattern" slicing: the slice is a continuation, just
// spelled as data instead of a closure. Lifting it from a flat list to
// the AST's tree shape turns that slice into an actual `&mut dyn FnMut`.

use super::ast::{AnchorKind, CharClassKind, Node, QuantKind};
use super::Regex;

// Captures owned by a single match attempt. Slot 0 is reserved and never
// written; length is always group_count + 1.
pub type Captures = Vec<Option<String>>;

type Cont<'a> = dyn FnMut(usize, Captures) -> bool + 'a;

// Tries starting offsets in ascending order (on char boundaries only)
// and returns true the moment one succeeds. If the pattern is anchored
// at the start (^ is its leftmost atom), only offset 0 is tried, since ^
// can never succeed anywhere else.
pub fn find(pattern: &Regex, line: &str) -> bool {
    let Some(root) = &pattern.root else {
        return true; // empty pattern: zero-width match at any position
    };

    if starts_with_start_anchor(root) {
        return try_at(root, pattern.group_count, line, 0);
    }

    for pos in line.char_indices().map(|(i, _)| i) {
        if try_at(root, pattern.group_count, line, pos) {
            return true;
        }
    }
    try_at(root, pattern.group_count, line, line.len())
}

fn try_at(root: &Node, group_count: usize, line: &str, pos: usize) -> bool {
    let caps: Captures = vec![None; group_count + 1];
    let mut matched = false;
    match_node(root, line, pos, caps, &mut |_end, _caps| {
        matched = true;
        true
    });
    matched
}

// true iff every way of matching `node` requires starting at position 0,
// i.e. its leftmost atom is always Anchor::Start.
fn starts_with_start_anchor(node: &Node) -> bool {
    match node {
        Node::Anchor(AnchorKind::Start) => true,
        Node::Concat(children) => children.first().is_some_and(starts_with_start_anchor),
        Node::Group { child, .. } => starts_with_start_anchor(child),
        Node::Alt(branches) => branches.iter().all(starts_with_start_anchor),
        _ => false,
    }
}

fn match_node(node: &Node, line: &str, pos: usize, caps: Captures, cont: &mut Cont<'_>) -> bool {
    match node {
        Node::Literal(c) => match_char(line, pos, caps, cont, |x| x == *c),
        Node::Dot => match_char(line, pos, caps, cont, |_| true),
        Node::CharClass(CharClassKind::Digit) => {
            match_char(line, pos, caps, cont, |c| c.is_ascii_digit())
        }
        Node::CharClass(CharClassKind::Word) => {
            match_char(line, pos, caps, cont, |c| {
                c.is_ascii_alphanumeric() || c == '_'
            })
        }
        Node::CharSet { set, negated } => {
            match_char(line, pos, caps, cont, |c| set.contains(&c) != *negated)
        }
        Node::Anchor(AnchorKind::Start) => pos == 0 && cont(pos, caps),
        Node::Anchor(AnchorKind::End) => pos == line.len() && cont(pos, caps),
        Node::Backref(index) => match caps.get(*index).cloned().flatten() {
            Some(text) if line[pos..].starts_with(text.as_str()) => cont(pos + text.len(), caps),
            _ => false,
        },
        Node::Concat(children) => match_seq(children, line, pos, caps, cont),
        Node::Alt(branches) => {
            for branch in branches {
                if match_node(branch, line, pos, caps.clone(), cont) {
                    return true;
                }
            }
            false
        }
        Node::Group { child, index } => {
            let index = *index;
            match_node(child, line, pos, caps, &mut |end, mut caps| {
                caps[index] = Some(line[pos..end].to_string());
                cont(end, caps)
            })
        }
        Node::Quant {
            child,
            kind,
            greedy,
        } => match kind {
            QuantKind::Opt => match_opt(child, line, pos, caps, *greedy, cont),
            QuantKind::Star => match_star(child, line, pos, caps, *greedy, cont),
            QuantKind::Plus => match_plus(child, line, pos, caps, *greedy, cont),
        },
    }
}

// Matches a sequence of sibling nodes (a Concat's children) by threading
// each child's continuation into the next, with the final child's
// continuation being the caller's cont.
fn match_seq(nodes: &[Node], line: &str, pos: usize, caps: Captures, cont: &mut Cont<'_>) -> bool {
    match nodes.split_first() {
        None => cont(pos, caps),
        Some((first, rest)) => match_node(first, line, pos, caps, &mut |end, caps| {
            match_seq(rest, line, end, caps, cont)
        }),
    }
}

fn match_char(
    line: &str,
    pos: usize,
    caps: Captures,
    cont: &mut Cont<'_>,
    accept: impl Fn(char) -> bool,
) -> bool {
    match line[pos..].chars().next() {
        Some(c) if accept(c) => cont(pos + c.len_utf8(), caps),
        _ => false,
    }
}

// ? : one occurrence then zero when greedy, reversed when lazy.
fn match_opt(
    child: &Node,
    line: &str,
    pos: usize,
    caps: Captures,
    greedy: bool,
    cont: &mut Cont<'_>,
) -> bool {
    if greedy {
        if match_node(child, line, pos, caps.clone(), cont) {
            return true;
        }
        cont(pos, caps)
    } else {
        if cont(pos, caps.clone()) {
            return true;
        }
        match_node(child, line, pos, caps, cont)
    }
}

// * : zero, one, two, ... occurrences, longest first when greedy.
// Refuses to add a further iteration that does not advance pos, so a
// child that can match empty (e.g. ()*) cannot loop forever: once an
// iteration stalls, the only option left is to stop.
fn match_star(
    child: &Node,
    line: &str,
    pos: usize,
    caps: Captures,
    greedy: bool,
    cont: &mut Cont<'_>,
) -> bool {
    if greedy {
        let tried_more = match_node(child, line, pos, caps.clone(), &mut |end, caps| {
            end > pos && match_star(child, line, end, caps, greedy, cont)
        });
        tried_more || cont(pos, caps)
    } else {
        if cont(pos, caps.clone()) {
            return true;
        }
        match_node(child, line, pos, caps, &mut |end, caps| {
            end > pos && match_star(child, line, end, caps, greedy, cont)
        })
    }
}

// + : one mandatory occurrence, then * semantics for the rest.
fn match_plus(
    child: &Node,
    line: &str,
    pos: usize,
    caps: Captures,
    greedy: bool,
    cont: &mut Cont<'_>,
) -> bool {
    match_node(child, line, pos, caps, &mut |end, caps| {
        match_star(child, line, end, caps, greedy, cont)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::parser::parse;

    fn matches(pattern: &str, line: &str) -> bool {
        find(&parse(pattern).unwrap(), line)
    }

    // Returns the captures of the first successful match attempt, if
    // any. Used only by tests that check capture-group content
    // directly; the public find API reports match/no-match only.
    fn first_captures(pattern: &str, line: &str) -> Option<Captures> {
        let regex = parse(pattern).unwrap();
        let root = regex.root.as_ref()?;
        for pos in line.char_indices().map(|(i, _)| i).chain([line.len()]) {
            let caps: Captures = vec![None; regex.group_count + 1];
            let mut result = None;
            match_node(root, line, pos, caps, &mut |_end, caps| {
                result = Some(caps);
                true
            });
            if result.is_some() {
                return result;
            }
        }
        None
    }

    #[test]
    fn empty_pattern_matches_every_line() {
        assert!(matches("", "anything"));
        assert!(matches("", ""));
    }

    #[test]
    fn literal_matches_prefix_anywhere() {
        assert!(matches("abc", "xxabcyy"));
        assert!(!matches("abc", "ab"));
    }

    #[test]
    fn anchored_start_only_matches_at_offset_zero() {
        assert!(matches("^cat", "cat sat"));
        assert!(!matches("^cat", "a cat sat"));
    }

    #[test]
    fn anchored_end_only_matches_at_end_of_input() {
        assert!(matches("cat$", "the cat"));
        assert!(!matches("cat$", "cats"));
    }

    #[test]
    fn digit_class_matches_three_digits() {
        assert!(matches(r"\d\d\d", "abc123xyz"));
        assert!(!matches(r"\d\d\d", "abc12xyz"));
    }

    #[test]
    fn word_class_excludes_punctuation() {
        assert!(matches(r"\w+", "a_1"));
        assert!(!matches(r"\w", "-"));
    }

    #[test]
    fn negated_charset_is_a_complement() {
        assert!(matches("[^aeiou]", "z"));
        assert!(!matches("[^aeiou]", "a"));
    }

    #[test]
    fn plus_requires_at_least_one_occurrence() {
        assert!(!matches("a+b", "b"));
        assert!(matches("a+b", "aaab"));
    }

    #[test]
    fn star_allows_zero_occurrences() {
        assert!(matches("ab*c", "ac"));
        assert!(matches("ab*c", "abbbc"));
    }

    #[test]
    fn opt_allows_zero_or_one_occurrence() {
        assert!(matches("colou?r", "color"));
        assert!(matches("colou?r", "colour"));
        assert!(!matches("colou?r", "colouur"));
    }

    #[test]
    fn alternation_is_leftmost_first() {
        assert!(matches("(cat|dog)s?", "two dogs here"));
        assert!(!matches("(a|bc)d", "abcd"));
    }

    #[test]
    fn group_records_its_own_span() {
        let caps = first_captures(r"(\w+) and \1", "pick and pick").unwrap();
        assert_eq!(caps[1].as_deref(), Some("pick"));
    }

    #[test]
    fn backreference_requires_exact_repeat() {
        assert!(matches(r"(\w+) and \1", "pick and pick"));
        assert!(!matches(r"(\w+) and \1", "pick and choose"));
    }

    #[test]
    fn greedy_plus_consumes_as_much_as_possible_then_backtracks() {
        assert!(matches("a+b", "aaab"));
        assert!(matches("a*ab", "aaab"));
    }

    #[test]
    fn quantified_group_applies_to_the_whole_group() {
        assert!(matches("(ab)+", "ababx"));
        assert!(!matches("(ab)+", "ax"));
    }

    #[test]
    fn zero_width_star_of_a_group_does_not_hang() {
        // A group that can match the empty string, repeated with '*',
        // must not loop forever.
        assert!(matches("(a?)*b", "aab"));
        assert!(matches("(a?)*", ""));
    }

    #[test]
    fn star_backtracks_to_satisfy_anchor() {
        assert!(matches(".*x$", "yyyx"));
        assert!(!matches(".*x$", "yyyxz"));
    }
}
