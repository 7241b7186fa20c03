use proptest::prelude::*;

use crate::dice::ALLOWED_FACES;

pub(crate) fn count_strategy() -> impl Strategy<Value = String> {
    prop::option::of(0u32..=20).prop_map(|count| count.map(|c| c.to_string()).unwrap_or_default())
}

pub(crate) fn modifier_strategy() -> impl Strategy<Value = String> {
    prop::option::of((prop_oneof![Just("+"), Just("-")], 0u32..=1000)).prop_map(|modifier| {
        match modifier {
            None => String::new(),
            Some((sign, value)) => format!("{}{}", sign, value),
        }
    })
}

/// Strings of the form `[count]D<faces>[±modifier]` that must always parse.
pub(crate) fn valid_notation_strategy() -> impl Strategy<Value = String> {
    (
        count_strategy(),
        prop::sample::select(ALLOWED_FACES.to_vec()),
        modifier_strategy(),
    )
        .prop_map(|(count, faces, modifier)| format!("{}D{}{}", count, faces, modifier))
}

/// Mostly notation-shaped strings, short enough that a valid one rolls quickly.
pub(crate) fn short_input_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9D+-]{0,8}", "[0-9a-zD+*-]{0,8}"]
}
