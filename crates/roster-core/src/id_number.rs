//! Fields derived from an 18-character resident ID number.
//!
//! Layout of the number (0-based character indices):
//!
//! | indices | meaning                      |
//! |---------|------------------------------|
//! | 0..6    | region of registration       |
//! | 6..14   | birth date, `YYYYMMDD`       |
//! | 14..17  | sequence; index 16 odd = male|
//! | 17      | check character (may be `X`) |
//!
//! Every decoder follows the same policy: an empty ID yields `""` (nothing to
//! derive), an ID that is not exactly 18 characters yields [`UNKNOWN`], and
//! so does an ID whose relevant digits do not parse. Nothing here fails.

/// Sentinel for a malformed ID number.
pub const UNKNOWN: &str = "?";
/// Length of a current-format resident ID number, in characters.
pub const ID_LENGTH: usize = 18;

pub const RESIDENT_ID_CARD: &str = "居民身份证";
pub const CHINA: &str = "中国";
pub const MALE: &str = "男";
pub const FEMALE: &str = "女";

const SEX_INDEX: usize = 16;
const YEAR: std::ops::Range<usize> = 6..10;
const MONTH: std::ops::Range<usize> = 10..12;
const DAY: std::ops::Range<usize> = 12..14;

enum Shape {
    Empty,
    Malformed,
    Valid(Vec<char>),
}

fn shape(id: &str) -> Shape {
    if id.is_empty() {
        return Shape::Empty;
    }
    let chars: Vec<char> = id.chars().collect();
    if chars.len() == ID_LENGTH {
        Shape::Valid(chars)
    } else {
        Shape::Malformed
    }
}

fn derive(id: &str, f: impl FnOnce(&[char]) -> Option<String>) -> String {
    match shape(id) {
        Shape::Empty => String::new(),
        Shape::Malformed => UNKNOWN.to_string(),
        Shape::Valid(chars) => f(&chars).unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

/// Document type. Only resident ID cards are recognized.
pub fn document_type(id: &str) -> String {
    derive(id, |_| Some(RESIDENT_ID_CARD.to_string()))
}

/// Nationality of the holder.
pub fn nationality(id: &str) -> String {
    derive(id, |_| Some(CHINA.to_string()))
}

/// Sex from the parity of the 17th character.
pub fn sex(id: &str) -> String {
    derive(id, |chars| {
        let digit = chars[SEX_INDEX].to_digit(10)?;
        let label = if digit % 2 == 0 { FEMALE } else { MALE };
        Some(label.to_string())
    })
}

/// Birth date as `YYYY/M/D`, month and day without leading zeros.
pub fn birth_date(id: &str) -> String {
    derive(id, |chars| {
        let year = digits(&chars[YEAR])?;
        let month: u32 = digits(&chars[MONTH])?.parse().ok()?;
        let day: u32 = digits(&chars[DAY])?.parse().ok()?;
        Some(format!("{year}/{month}/{day}"))
    })
}

fn digits(chars: &[char]) -> Option<String> {
    chars
        .iter()
        .all(char::is_ascii_digit)
        .then(|| chars.iter().collect())
}

/// All derived fields for one ID number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdDerived {
    pub document_type: String,
    pub nationality: String,
    pub sex: String,
    pub birth_date: String,
}

impl IdDerived {
    pub fn decode(id: &str) -> Self {
        Self {
            document_type: document_type(id),
            nationality: nationality(id),
            sex: sex(id),
            birth_date: birth_date(id),
        }
    }
}
