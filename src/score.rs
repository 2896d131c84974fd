use crate::types::Tier;

const HIGH_THRESHOLD: f64 = 80.0;
const MEDIUM_THRESHOLD: f64 = 60.0;

/// Parse a percentage like `72%` or `72.5%`.
///
/// After the first `%` is removed, the longest leading decimal number is
/// read and anything after it is ignored, so `85*` reads as 85. `Infinity`
/// is the only word accepted. Input without a leading number yields NaN.
pub fn parse_score(text: &str) -> f64 {
    leading_decimal(&text.replacen('%', "", 1))
}

fn leading_decimal(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_len = digits(end);
    end += int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = digits(end + 1);
        if int_len > 0 || frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_len = digits(exp);
        if exp_len > 0 {
            end = exp + exp_len;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Bucket a score: above 80 is High, above 60 is Medium, anything else
/// (NaN included) is Low.
pub fn classify(score: f64) -> Tier {
    if score > HIGH_THRESHOLD {
        Tier::High
    } else if score > MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}

pub fn classify_score(text: &str) -> Tier {
    classify(parse_score(text))
}
