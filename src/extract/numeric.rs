/// Best-effort numeral normalization for uncontrolled report prose.
///
/// Strips everything that is not a decimal digit (thousands separators,
/// `~` approximation markers, stray unit words) and parses the rest as
/// base 10. Anything unparseable is 0; this never fails.
pub fn normalize_number(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
