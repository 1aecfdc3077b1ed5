//! Recursive grammar built with `fix_point`: nested direction groups such as
//! `^ENWWW(NEEE|SSE(EE|N))$`

use aoc_parser::{BoxedParser, ParseError, Parser, ParserExt, fix_point, one_of, parse_all, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Group {
    Directions(Vec<Direction>),
    /// Alternatives, each a sequence of groups
    Branches(Vec<Vec<Group>>),
}

fn direction() -> impl Parser<Input = str, Output = Direction> {
    one_of(vec![
        text::char('N').becomes(Direction::North),
        text::char('S').becomes(Direction::South),
        text::char('E').becomes(Direction::East),
        text::char('W').becomes(Direction::West),
    ])
}

/// Alternatives separated by `|`; a trailing `|` adds an empty alternative
fn branches() -> impl Parser<Input = str, Output = Vec<Vec<Group>>> {
    fix_point(|branches| {
        let group: Vec<BoxedParser<'_, str, Group>> = vec![
            direction().one_or_more().map(Group::Directions).boxed(),
            text::char('(')
                .keep_right(branches)
                .keep_left(text::char(')'))
                .map(Group::Branches)
                .boxed(),
        ];
        one_of(group)
            .one_or_more()
            .one_or_more_separated(text::char('|'))
            .and_then(|alternatives: Vec<Vec<Group>>| {
                let with_empty = {
                    let mut extended = alternatives.clone();
                    extended.push(vec![Group::Directions(Vec::new())]);
                    extended
                };
                text::char('|').becomes(with_empty).otherwise(alternatives)
            })
    })
}

fn route() -> impl Parser<Input = str, Output = Group> {
    text::char('^')
        .keep_right(branches())
        .keep_left(text::char('$'))
        .map(Group::Branches)
}

/// Length of the longest path without detours through empty alternatives
fn longest(groups: &[Group]) -> usize {
    groups
        .iter()
        .map(|group| match group {
            Group::Directions(directions) => directions.len(),
            Group::Branches(alternatives) => alternatives
                .iter()
                .map(|alternative| longest(alternative))
                .max()
                .unwrap_or(0),
        })
        .sum()
}

#[test]
fn test_flat_route() {
    use Direction::*;
    let parsed = parse_all(&route(), "^WNE$").unwrap();
    assert_eq!(
        parsed,
        Group::Branches(vec![vec![Group::Directions(vec![West, North, East])]])
    );
}

#[test]
fn test_nested_route() {
    let parsed = parse_all(&route(), "^ENWWW(NEEE|SSE(EE|N))$").unwrap();
    let Group::Branches(alternatives) = &parsed else {
        panic!("expected branches, got {parsed:?}");
    };
    assert_eq!(alternatives.len(), 1);
    assert_eq!(alternatives[0].len(), 2);
    // ENWWW then SSE + EE
    assert_eq!(longest(&alternatives[0]), 10);
}

#[test]
fn test_trailing_bar_adds_empty_alternative() {
    let parsed = parse_all(&route(), "^N(E|W|)S$").unwrap();
    let Group::Branches(alternatives) = parsed else {
        panic!("expected branches");
    };
    let Group::Branches(inner) = &alternatives[0][1] else {
        panic!("expected nested branches");
    };
    assert_eq!(inner.len(), 3);
    assert_eq!(inner[2], vec![Group::Directions(Vec::new())]);
}

#[test]
fn test_deep_nesting() {
    let input = format!("^{}N{}$", "(".repeat(50), ")".repeat(50));
    assert!(parse_all(&route(), input.as_str()).is_ok());
}

#[test]
fn test_unbalanced_groups_fail() {
    let err = parse_all(&route(), "^N(E|W$").unwrap_err();
    assert!(matches!(err, ParseError::Failed { .. }));
}
