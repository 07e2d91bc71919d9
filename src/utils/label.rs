/// Uppercases the first ASCII word character of every word, where a word
/// starts at a `[A-Za-z0-9_]` character preceded by anything else.
pub fn capitalize_words(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_is_word = false;

    for c in label.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }

    out
}

/// Formats a [0,1] score as a percentage with two decimals.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) if value.is_finite() => format!("{}%", to_fixed_2(value * 100.0)),
        _ => "n/a".to_string(),
    }
}

/// Two-decimal rendering that rounds exact ties away from zero.
///
/// `{:.2}` rounds ties to even, so the third decimal is read from the exact
/// expansion of `value` and the rounding is applied on integer cents.
fn to_fixed_2(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e15 {
        return format!("{:.2}", value);
    }

    let exact = format!("{:.60}", magnitude);
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let digits: Vec<u64> = fraction
        .bytes()
        .map(|b| u64::from(b - b'0'))
        .chain(std::iter::repeat(0))
        .take(3)
        .collect();

    let mut cents = whole.parse::<u64>().unwrap_or(0) * 100 + digits[0] * 10 + digits[1];
    if digits[2] >= 5 {
        cents += 1;
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}
