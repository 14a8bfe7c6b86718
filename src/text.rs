//! Text helpers shared by segments: decoding with a printable fallback,
//! byte-size humanization and the editor's rounding.

/// Decode `bytes` as UTF-8, rendering each undecodable byte as `<xx>`.
///
/// Mirrors the editor's `strtrans()` for bytes it cannot display.
pub fn transliterate(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix decodes
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let bad = e.error_len().unwrap_or(after.len());
                for byte in &after[..bad] {
                    out.push_str(&format!("<{:02x}>", byte));
                }
                rest = &after[bad..];
            }
        }
    }
}

/// Whether the last character of `line` is a space or a tab
pub fn ends_with_whitespace(line: &str) -> bool {
    matches!(line.chars().last(), Some(' ') | Some('\t'))
}

/// Round half to even, matching the rounding used for percentages
pub fn round_percent(value: f64) -> i64 {
    value.round_ties_even() as i64
}

const UNITS: [(&str, usize); 6] = [("", 0), ("k", 0), ("M", 1), ("G", 2), ("T", 2), ("P", 2)];

/// Human readable byte count, e.g. `"1.5 MiB"` or `"1 kB"` with SI prefixes
pub fn humanize_bytes(num: u64, suffix: &str, si_prefix: bool) -> String {
    if num == 0 {
        return format!("0 {}", suffix);
    }
    let div: f64 = if si_prefix { 1000.0 } else { 1024.0 };
    let mut quotient = num as f64;
    let mut exponent = 0;
    while quotient >= div && exponent < UNITS.len() - 1 {
        quotient /= div;
        exponent += 1;
    }
    let (unit, decimals) = UNITS[exponent];
    let unit = if !unit.is_empty() && !si_prefix {
        format!("{}i", unit.to_uppercase())
    } else {
        unit.to_string()
    };
    format!("{:.*} {}{}", decimals, quotient, unit, suffix)
}
