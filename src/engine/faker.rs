//! The scalar value generator registry.
//!
//! Every directive type tag maps to one [`FakerKind`] variant here; a tag
//! with no variant is rejected at schema compile time, so generation never
//! sees an unknown tag. Parameters arrive pre-parsed from the directive.

use chrono::{Duration, Utc};
use fake::faker::address::en::{CityName, CountryName, PostCode, StateAbbr, StreetName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name, Title};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Value};

use crate::domain::schema::Param;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakerKind {
    // Text
    Word,
    Words,
    Sentence,
    Paragraph,
    Title,
    // Personal
    Name,
    FirstName,
    LastName,
    // Contact
    Email,
    Username,
    PhoneNumber,
    // Address
    City,
    Country,
    StateAbbr,
    PostCode,
    StreetName,
    // Numbers
    RandomDigit,
    RandomDigitNotNull,
    NumberBetween,
    Boolean,
    // Identifiers
    Uuid,
    // Time
    Date,
    DateTime,
    // Special
    ImageUrl,
    RandomElement,
}

impl FakerKind {
    /// Resolve a directive type tag. Tags are snake_case as written in the
    /// endpoint configuration.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "word" => Self::Word,
            "words" => Self::Words,
            "sentence" => Self::Sentence,
            "paragraph" => Self::Paragraph,
            "title" => Self::Title,
            "name" => Self::Name,
            "first_name" => Self::FirstName,
            "last_name" => Self::LastName,
            "email" => Self::Email,
            "username" => Self::Username,
            "phone_number" => Self::PhoneNumber,
            "city" => Self::City,
            "country" => Self::Country,
            "state_abbr" => Self::StateAbbr,
            "postcode" => Self::PostCode,
            "street_name" => Self::StreetName,
            "random_digit" => Self::RandomDigit,
            "random_digit_not_null" => Self::RandomDigitNotNull,
            "number_between" => Self::NumberBetween,
            "boolean" => Self::Boolean,
            "uuid" => Self::Uuid,
            "date" => Self::Date,
            "date_time" => Self::DateTime,
            "image_url" => Self::ImageUrl,
            "random_element" => Self::RandomElement,
            _ => return None,
        };
        Some(kind)
    }
}

/// Produce one scalar value for a compiled directive.
pub fn generate(kind: FakerKind, params: &[Param]) -> Value {
    let mut rng = rand::thread_rng();
    match kind {
        FakerKind::Word => json!(Word().fake::<String>()),
        FakerKind::Words => {
            let n = int_param(params, 0).unwrap_or(3).max(1) as usize;
            json!(Words(n..n + 1).fake::<Vec<String>>().join(" "))
        }
        FakerKind::Sentence => match int_param(params, 0) {
            Some(n) => {
                let n = n.max(1) as usize;
                json!(Sentence(n..n + 1).fake::<String>())
            }
            None => json!(Sentence(4..10).fake::<String>()),
        },
        FakerKind::Paragraph => match int_param(params, 0) {
            Some(n) => {
                let n = n.max(1) as usize;
                json!(Paragraph(n..n + 1).fake::<String>())
            }
            None => json!(Paragraph(1..3).fake::<String>()),
        },
        FakerKind::Title => json!(Title().fake::<String>()),
        FakerKind::Name => json!(Name().fake::<String>()),
        FakerKind::FirstName => json!(FirstName().fake::<String>()),
        FakerKind::LastName => json!(LastName().fake::<String>()),
        FakerKind::Email => json!(SafeEmail().fake::<String>()),
        FakerKind::Username => json!(Username().fake::<String>()),
        FakerKind::PhoneNumber => json!(PhoneNumber().fake::<String>()),
        FakerKind::City => json!(CityName().fake::<String>()),
        FakerKind::Country => json!(CountryName().fake::<String>()),
        FakerKind::StateAbbr => json!(StateAbbr().fake::<String>()),
        FakerKind::PostCode => json!(PostCode().fake::<String>()),
        FakerKind::StreetName => json!(StreetName().fake::<String>()),
        FakerKind::RandomDigit => json!(rng.gen_range(0..=9)),
        FakerKind::RandomDigitNotNull => json!(rng.gen_range(1..=9)),
        FakerKind::NumberBetween => {
            let mut min = int_param(params, 0).unwrap_or(0);
            let mut max = int_param(params, 1).unwrap_or(1000);
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            json!(rng.gen_range(min..=max))
        }
        FakerKind::Boolean => {
            let percent = int_param(params, 0).unwrap_or(50).clamp(0, 100);
            json!(rng.gen_bool(percent as f64 / 100.0))
        }
        FakerKind::Uuid => json!(uuid::Uuid::new_v4().to_string()),
        FakerKind::Date => {
            let days = rng.gen_range(0..3650);
            json!((Utc::now() - Duration::days(days)).format("%Y-%m-%d").to_string())
        }
        FakerKind::DateTime => {
            let seconds = rng.gen_range(0..315_360_000i64);
            json!((Utc::now() - Duration::seconds(seconds)).to_rfc3339())
        }
        FakerKind::ImageUrl => {
            let width = int_param(params, 0).unwrap_or(640);
            let height = int_param(params, 1).unwrap_or(480);
            json!(format!("https://via.placeholder.com/{width}x{height}.png"))
        }
        FakerKind::RandomElement => {
            if params.is_empty() {
                Value::Null
            } else {
                match &params[rng.gen_range(0..params.len())] {
                    Param::Int(i) => json!(i),
                    Param::Float(f) => json!(f),
                    Param::Str(s) => json!(s),
                }
            }
        }
    }
}

fn int_param(params: &[Param], index: usize) -> Option<i64> {
    params.get(index).and_then(Param::as_i64)
}
