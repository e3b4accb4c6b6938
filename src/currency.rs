// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Prefix(&'static str),
    Suffix(&'static str),
}

struct CurrencyStyle {
    code: &'static str,
    placement: Placement,
    minor_digits: u32,
}

const STYLES: &[CurrencyStyle] = &[
    CurrencyStyle {
        code: "USD",
        placement: Placement::Prefix("$"),
        minor_digits: 2,
    },
    CurrencyStyle {
        code: "EUR",
        placement: Placement::Prefix("€"),
        minor_digits: 2,
    },
    CurrencyStyle {
        code: "GBP",
        placement: Placement::Prefix("£"),
        minor_digits: 2,
    },
    CurrencyStyle {
        code: "PLN",
        placement: Placement::Suffix("zł"),
        minor_digits: 2,
    },
    CurrencyStyle {
        code: "JPY",
        placement: Placement::Suffix("JPY"),
        minor_digits: 0,
    },
];

/// Currency codes offered in settings.
pub const SUPPORTED_CURRENCIES: [&str; 5] = ["PLN", "USD", "EUR", "GBP", "JPY"];

fn style_for(code: &str) -> Option<&'static CurrencyStyle> {
    STYLES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// Format `amount` for display in `code`.
///
/// Currencies without a minor unit are rounded half away from zero and shown
/// without decimals; everything else gets exactly two. Unknown codes are
/// appended as a suffix.
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let style = style_for(code);
    let digits = style.map(|s| s.minor_digits).unwrap_or(2);
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let body = group_thousands(rounded.abs(), digits);
    match style.map(|s| s.placement) {
        Some(Placement::Prefix(sym)) => format!("{}{}{}", sign, sym, body),
        Some(Placement::Suffix(sym)) => format!("{}{} {}", sign, body, sym),
        None => format!("{}{} {}", sign, body, code.to_uppercase()),
    }
}

fn group_thousands(abs: Decimal, digits: u32) -> String {
    let plain = format!("{:.*}", digits as usize, abs);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
