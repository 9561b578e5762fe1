//! Lexical cleanup of numeric attribute data.
//!
//! Attribute values like path parameters or polygon point lists arrive as
//! free-form strings: whitespace or commas between numbers, signs glued
//! to the previous token, scientific notation, and decimal chains
//! without separators. The functions here turn that into a flat list of
//! numbers without doing any geometric interpretation.

use log::trace;

/// Stand-in for exponent signs while unsigned minus/plus are split off.
const EXPONENT_GUARD: &str = "~~~";

/// Normalize a raw parameter string into comma separated numeric tokens.
///
/// Whitespace runs collapse to single commas, every negative number gets
/// its own token, bare plus signs are dropped and `e+`/`e-` exponent
/// markers are preserved. Purely lexical, no numbers are parsed here.
pub(crate) fn sanitize_parameter_data(data: &str) -> String {
    // Clean up whitespace and replace with commas
    let mut data = data.split_whitespace().collect::<Vec<_>>().join(",");

    // Clean up numbers
    //     Maintain scientific notation e+ and e- numbers
    //     Commas before all negative numbers
    //     Remove + to denote positive numbers
    data = data.replace('E', "e");

    data = data.replace("e-", EXPONENT_GUARD);
    data = data.replace('-', ",-");
    data = data.replace(EXPONENT_GUARD, "e-");

    data = data.replace("e+", EXPONENT_GUARD);
    data = data.replace('+', ",");
    data = data.replace(EXPONENT_GUARD, "e+");

    // Clean up commas
    collapse_commas(&data)
}

fn collapse_commas(data: &str) -> String {
    let mut result = String::with_capacity(data.len());
    let mut previous_comma = false;
    for c in data.chars() {
        if c == ',' {
            if !previous_comma {
                result.push(c);
            }
            previous_comma = true;
        } else {
            result.push(c);
            previous_comma = false;
        }
    }
    result
}

/// Split a sanitized comma stream into numbers.
///
/// Tokens with more than one `.` are decimal chains without separators:
/// `1.2.3.4` stands for `1.2, 0.3, 0.4`. Tokens that fail to parse as a
/// number count as `0`.
pub(crate) fn chunk_and_validate_parameters(data: &str) -> Vec<f64> {
    let data = data.trim_matches(',');
    if data.is_empty() {
        return Vec::new();
    }

    let mut parameters = Vec::new();
    for token in data.split(',') {
        let pieces: Vec<&str> = token.split('.').collect();
        match pieces.len() {
            1 => parameters.push(number_or_zero(pieces[0])),
            2 => parameters.push(number_or_zero(token)),
            _ => {
                // Chain of decimals sharing no leading zero
                parameters.push(number_or_zero(&format!("{}.{}", pieces[0], pieces[1])));
                for piece in &pieces[2..] {
                    parameters.push(number_or_zero(&format!("0.{}", piece)));
                }
            }
        }
    }
    trace!("chunk_and_validate_parameters: {} values", parameters.len());
    parameters
}

fn number_or_zero(token: &str) -> f64 {
    token.parse().unwrap_or(0.0)
}
