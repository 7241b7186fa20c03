use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{char, digit0},
    combinator::{all_consuming, rest},
    sequence::preceded,
};

use crate::{
    dice::{DiceNotation, Faces},
    error::{NotationError, NotationErrorKind},
};

/// The raw pieces of `count D faces modifier`, before any of them is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segments<'a> {
    count: &'a str,
    faces: &'a str,
    modifier: Option<&'a str>,
}

/// Parses and validates a dice notation such as `7D12-5`.
///
/// The checks run in a fixed order and the first failure wins:
/// alphabet, number of `D`s, number of signs, trailing sign, face count,
/// and finally the count segment. The returned error always carries `input`.
pub fn parse_notation(input: &str) -> Result<DiceNotation, NotationError> {
    let notation = validate(input).map_err(|kind| NotationError::new(kind, input))?;
    log::debug!("Parsed {input:?} as {notation}");
    Ok(notation)
}

fn validate(input: &str) -> Result<DiceNotation, NotationErrorKind> {
    check_alphabet(input)?;
    check_separators(input)?;
    check_signs(input)?;

    let segments = split_segments(input)?;

    let faces = Faces::from_digits(segments.faces)
        .ok_or_else(|| NotationErrorKind::DisallowedFaceCount(segments.faces.to_string()))?;

    if segments.count.contains(['+', '-']) {
        return Err(NotationErrorKind::InvalidCountSegment);
    }

    let count: u32 = if segments.count.is_empty() {
        1
    } else {
        parse_number(segments.count)?
    };
    let modifier: i64 = match segments.modifier {
        Some(modifier) => parse_number(modifier)?,
        None => 0,
    };

    // keeps `maximum()` exact; `minimum()` cannot overflow with a non-negative count
    let highest_roll = i64::from(count) * i64::from(faces.get());
    if modifier.checked_add(highest_roll).is_none() {
        return Err(NotationErrorKind::NumberOutOfRange(
            segments.modifier.unwrap_or_default().to_string(),
        ));
    }

    Ok(DiceNotation::new(count, faces, modifier))
}

fn check_alphabet(input: &str) -> Result<(), NotationErrorKind> {
    match input
        .chars()
        .find(|&c| !(c.is_ascii_digit() || matches!(c, 'D' | '+' | '-')))
    {
        Some(c) => Err(NotationErrorKind::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn check_separators(input: &str) -> Result<(), NotationErrorKind> {
    match input.matches('D').count() {
        0 => Err(NotationErrorKind::NoDiceSpecified),
        1 => Ok(()),
        _ => Err(NotationErrorKind::MultipleDiceSeparators),
    }
}

fn check_signs(input: &str) -> Result<(), NotationErrorKind> {
    if input.matches(['+', '-']).count() > 1 {
        return Err(NotationErrorKind::MultipleModifiers);
    }
    match input.chars().last() {
        Some(sign @ ('+' | '-')) => Err(NotationErrorKind::MissingModifierValue(sign)),
        _ => Ok(()),
    }
}

/// Splits an input that already passed the character, separator and sign checks.
///
/// Whatever follows the face digits is taken whole as the modifier; the sign
/// checks leave it either empty or a single sign followed by digits.
fn split_segments(input: &str) -> Result<Segments<'_>, NotationErrorKind> {
    match all_consuming(segments).parse(input) {
        Ok((_, segments)) => Ok(segments),
        // the grammar can only fail here on a missing `D`
        Err(_) => Err(NotationErrorKind::NoDiceSpecified),
    }
}

fn segments(input: &str) -> IResult<&str, Segments<'_>> {
    let (input, (count, faces, modifier)) = (
        take_till(|c: char| c == 'D'),
        preceded(char('D'), digit0),
        rest,
    )
        .parse(input)?;

    Ok((
        input,
        Segments {
            count,
            faces,
            modifier: (!modifier.is_empty()).then_some(modifier),
        },
    ))
}

fn parse_number<T: std::str::FromStr>(digits: &str) -> Result<T, NotationErrorKind> {
    digits
        .parse()
        .map_err(|_| NotationErrorKind::NumberOutOfRange(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::notation_test_strategies::valid_notation_strategy;

    fn kind(input: &str) -> NotationErrorKind {
        parse_notation(input).unwrap_err().kind
    }

    fn parsed(input: &str) -> (u32, u32, i64) {
        let notation = parse_notation(input).unwrap();
        (notation.count, notation.faces.get(), notation.modifier)
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(parsed("7D12-5"), (7, 12, -5));
        assert_eq!(parsed("2D10+10"), (2, 10, 10));
        assert_eq!(parsed("5D8-4"), (5, 8, -4));
        assert_eq!(parsed("2D3"), (2, 3, 0));
        assert_eq!(parsed("D100"), (1, 100, 0));
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parsed("D6"), (1, 6, 0));
        assert_eq!(parse_notation("D6").unwrap(), parse_notation("1D6+0").unwrap());
        assert_eq!(parsed("D12-1"), (1, 12, -1));
    }

    #[test]
    fn test_parse_zero_count() {
        assert_eq!(parsed("0D6+3"), (0, 6, 3));
        assert_eq!(parsed("000D6"), (0, 6, 0));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(kind("2d8"), NotationErrorKind::InvalidCharacter('d'));
        assert_eq!(kind("D8*2"), NotationErrorKind::InvalidCharacter('*'));
        assert_eq!(kind(" D6"), NotationErrorKind::InvalidCharacter(' '));
        // the alphabet check runs before any structural check
        assert_eq!(kind("DDx"), NotationErrorKind::InvalidCharacter('x'));
    }

    #[test]
    fn test_separator_count() {
        assert_eq!(kind(""), NotationErrorKind::NoDiceSpecified);
        assert_eq!(kind("2+2"), NotationErrorKind::NoDiceSpecified);
        assert_eq!(kind("DD34"), NotationErrorKind::MultipleDiceSeparators);
        assert_eq!(kind("DD100"), NotationErrorKind::MultipleDiceSeparators);
        assert_eq!(kind("2D6+1D6"), NotationErrorKind::MultipleDiceSeparators);
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(kind("2D6+1+2"), NotationErrorKind::MultipleModifiers);
        assert_eq!(kind("2D10-10+1"), NotationErrorKind::MultipleModifiers);
        // reported before the trailing sign
        assert_eq!(kind("2D6+-"), NotationErrorKind::MultipleModifiers);
    }

    #[test]
    fn test_missing_modifier_value() {
        assert_eq!(kind("32D3-"), NotationErrorKind::MissingModifierValue('-'));
        assert_eq!(kind("D6+"), NotationErrorKind::MissingModifierValue('+'));
        // the face check has not run yet
        assert_eq!(kind("D7+"), NotationErrorKind::MissingModifierValue('+'));
    }

    #[test]
    fn test_disallowed_face_count() {
        assert_eq!(kind("D1"), NotationErrorKind::DisallowedFaceCount("1".into()));
        assert_eq!(kind("2D2"), NotationErrorKind::DisallowedFaceCount("2".into()));
        assert_eq!(kind("7D7+7"), NotationErrorKind::DisallowedFaceCount("7".into()));
        assert_eq!(kind("D06"), NotationErrorKind::DisallowedFaceCount("06".into()));
        assert_eq!(kind("3D+4"), NotationErrorKind::DisallowedFaceCount("".into()));
        assert_eq!(kind("3D"), NotationErrorKind::DisallowedFaceCount("".into()));
    }

    #[test]
    fn test_invalid_count_segment() {
        assert_eq!(kind("+D10"), NotationErrorKind::InvalidCountSegment);
        assert_eq!(kind("4-3D6"), NotationErrorKind::InvalidCountSegment);
        // the face check runs first
        assert_eq!(kind("-D7"), NotationErrorKind::DisallowedFaceCount("7".into()));
    }

    #[test]
    fn test_number_out_of_range() {
        assert_eq!(
            kind("99999999999D6"),
            NotationErrorKind::NumberOutOfRange("99999999999".into())
        );
        assert_eq!(
            kind("D6+99999999999999999999"),
            NotationErrorKind::NumberOutOfRange("+99999999999999999999".into())
        );
        // the modifier alone fits but the highest total would not
        assert_eq!(
            kind("2D100+9223372036854775800"),
            NotationErrorKind::NumberOutOfRange("+9223372036854775800".into())
        );
    }

    #[test]
    fn test_wide_modifiers() {
        assert_eq!(parsed("D6+99999999999"), (1, 6, 99_999_999_999));
        assert_eq!(parsed("D6-9223372036854775808"), (1, 6, i64::MIN));
        assert_eq!(parsed("0D6+9223372036854775807"), (0, 6, i64::MAX));
        assert_eq!(
            parse_notation("D6+99999999999").unwrap().bounds(),
            (100_000_000_000, 100_000_000_005)
        );
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(
            split_segments("4D10-2"),
            Ok(Segments {
                count: "4",
                faces: "10",
                modifier: Some("-2"),
            })
        );
        assert_eq!(
            split_segments("D"),
            Ok(Segments {
                count: "",
                faces: "",
                modifier: None,
            })
        );
        assert_eq!(split_segments("46"), Err(NotationErrorKind::NoDiceSpecified));
    }

    #[test]
    fn test_error_carries_input() {
        let err = parse_notation("2D6+1+2").unwrap_err();
        assert_eq!(err.input(), "2D6+1+2");
        assert_eq!(err.to_string(), "Only one modifier is allowed! [2D6+1+2]");
    }

    #[test]
    fn test_validation_is_idempotent() {
        for input in ["", "2d8", "DD34", "2D6+1+2", "32D3-", "D1", "+D10"] {
            let first = parse_notation(input).unwrap_err();
            for _ in 0..10 {
                assert_eq!(parse_notation(input).unwrap_err(), first);
            }
        }
    }

    fn any_input() -> impl Strategy<Value = String> {
        prop_oneof![any::<String>(), "[0-9D+-]{0,12}"]
    }

    proptest! {
        #[test]
        fn prop_parse_is_total_and_stable(input in any_input()) {
            let first = parse_notation(&input);
            if let Err(err) = &first {
                prop_assert_eq!(err.input(), input.as_str());
            }
            for _ in 0..3 {
                prop_assert_eq!(&parse_notation(&input), &first);
            }
        }

        #[test]
        fn prop_valid_notation_round_trips(input in valid_notation_strategy()) {
            let notation = parse_notation(&input).unwrap();
            prop_assert_eq!(parse_notation(&notation.to_string()), Ok(notation));
        }
    }

    #[test]
    fn test_from_str() {
        let notation: DiceNotation = "6D8+7".parse().unwrap();
        assert_eq!(notation.bounds(), (13, 55));
        assert!("6D8+".parse::<DiceNotation>().is_err());
    }
}
