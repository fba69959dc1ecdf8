/// Lower-cases, trims and collapses internal whitespace.
///
/// Classification runs on this form; entity extraction keeps using the raw
/// transcript so digits and original casing survive.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
