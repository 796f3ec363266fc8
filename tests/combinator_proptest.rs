//! Property-based tests for the parser contract
//!
//! Inputs mix ASCII and multi-byte characters; positions are drawn from the
//! character boundaries of each input, end of input included.

use combinate::grammars::calc::{self, CalcOptions, Calculator};
use combinate::{
    char_class, choice, literal, optional, pattern, repeat, sequence, DriverOptions,
    FailureTracker, Parser,
};
use proptest::prelude::*;

/// Generate an input together with a valid position into it
fn input_and_position() -> impl Strategy<Value = (String, usize)> {
    "[ab()0-9+,xé ]{0,16}".prop_flat_map(|input| {
        let mut boundaries: Vec<usize> = input.char_indices().map(|(i, _)| i).collect();
        boundaries.push(input.len());
        (Just(input), prop::sample::select(boundaries))
    })
}

/// Generate a flat calculator expression and its value
fn sum_strategy() -> impl Strategy<Value = (String, i64)> {
    (
        0i64..1000,
        prop::collection::vec((prop::bool::ANY, 0i64..1000), 0..8),
    )
        .prop_map(|(first, rest)| {
            let mut source = first.to_string();
            let mut total = first;
            for (plus, operand) in rest {
                if plus {
                    source.push('+');
                    total += operand;
                } else {
                    source.push('-');
                    total -= operand;
                }
                source.push_str(&operand.to_string());
            }
            (source, total)
        })
}

fn check_no_consumption_on_failure<T: 'static>(
    parser: &Parser<T>,
    input: &str,
    position: usize,
) -> Result<(), TestCaseError> {
    let result = parser.parse_at(input, position).unwrap();
    let next = result.next_position();
    if result.matched() {
        prop_assert!(result.value().is_some());
        prop_assert!(next >= position && next <= input.len());
        prop_assert!(input.is_char_boundary(next));
    } else {
        prop_assert_eq!(next, position);
    }
    Ok(())
}

proptest! {
    #[test]
    fn primitives_do_not_consume_on_failure((input, position) in input_and_position()) {
        check_no_consumption_on_failure(&literal("ab"), &input, position)?;
        check_no_consumption_on_failure(&literal("é"), &input, position)?;
        check_no_consumption_on_failure(&char_class("ab", false), &input, position)?;
        check_no_consumption_on_failure(&char_class("ab", true), &input, position)?;
        check_no_consumption_on_failure(&pattern("[0-9]+").unwrap(), &input, position)?;
        check_no_consumption_on_failure(&pattern("a|ab").unwrap(), &input, position)?;
    }

    #[test]
    fn choice_does_not_consume_on_failure((input, position) in input_and_position()) {
        let parser = choice((
            sequence((literal("("), pattern("[0-9]+").unwrap(), literal(")"))).map(|_| ()),
            literal("x").map(|_| ()),
        ));
        check_no_consumption_on_failure(&parser, &input, position)?;
    }

    #[test]
    fn repeat_and_optional_always_match((input, position) in input_and_position()) {
        let many = repeat(choice((literal("ab"), pattern("[0-9]+").unwrap())));
        let result = many.parse_at(&input, position).unwrap();
        prop_assert!(result.matched());
        prop_assert!(result.next_position() >= position);

        let maybe = optional(sequence((literal("("), literal("x"), literal(")"))));
        let result = maybe.parse_at(&input, position).unwrap();
        prop_assert!(result.matched());
        if result.value() == Some(&None) {
            prop_assert_eq!(result.next_position(), position);
        }
    }

    #[test]
    fn sequence_ends_where_last_parser_left_off((input, position) in input_and_position()) {
        let first = char_class("ab()", false);
        let second = repeat(char_class("0123456789", false));
        let parser = sequence((first.clone(), second.clone()));

        let result = parser.parse_at(&input, position).unwrap();
        if result.matched() {
            let after_first = first.parse_at(&input, position).unwrap().next_position();
            let after_second = second.parse_at(&input, after_first).unwrap().next_position();
            prop_assert_eq!(result.next_position(), after_second);
            prop_assert!(result.next_position() >= position);
        }
    }

    #[test]
    fn choice_prefers_earlier_alternative((input, position) in input_and_position()) {
        let parser = choice((literal("a"), literal("ab")));
        let short = literal("a").parse_at(&input, position).unwrap();
        let result = parser.parse_at(&input, position).unwrap();
        if short.matched() {
            prop_assert_eq!(result, short);
        } else {
            prop_assert_eq!(result, literal("ab").parse_at(&input, position).unwrap());
        }
    }

    #[test]
    fn invocation_is_idempotent((input, position) in input_and_position()) {
        let tracker = FailureTracker::new();
        let options = CalcOptions { allow_whitespace: true };
        let grammar = calc::grammar(options, &tracker).unwrap();
        prop_assert_eq!(
            grammar.parse_at(&input, position),
            grammar.parse_at(&input, position)
        );
    }

    #[test]
    fn sums_evaluate_like_integers((source, expected) in sum_strategy()) {
        let calculator = Calculator::new(CalcOptions::default(), DriverOptions::default()).unwrap();
        prop_assert_eq!(calculator.evaluate(&source), Ok(expected));
        prop_assert_eq!(calculator.evaluate(&format!("({})", source)), Ok(expected));
    }
}
