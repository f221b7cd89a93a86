use crate::quiz::Question;
use alloc::{boxed::Box, string::String, vec::Vec};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Raised when a textual choice does not name any variant.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownVariant;

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unrecognized option.")
    }
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
        pub enum $name {
            #[default]
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;
            fn from_str(text: &str) -> Result<Self, Self::Err> {
                match text {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant),
                }
            }
        }
    };
}

text_enum! {
    /// Whether attempting the quiz costs anything.
    PricingType { Free => "free", Paid => "paid" }
}

text_enum! {
    /// How many times a single user may attempt the quiz.
    AttemptLimit { Unlimited => "unlimited", Once => "1" }
}

text_enum! {
    /// Who may discover the quiz once it is published.
    Visibility { Public => "public", Unlisted => "unlisted", Private => "private" }
}

text_enum! {
    Difficulty { Medium => "medium", Easy => "easy", Hard => "hard" }
}

/// Step 2 of the wizard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pricing {
    pub kind: PricingType,
    /// Raw price input. Only meaningful for [`PricingType::Paid`].
    pub price: String,
    pub coupon_code: String,
    pub allow_offline_payment: bool,
}

/// Step 3 of the wizard. Numeric fields keep the raw input until submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasicSettings {
    pub title: String,
    pub description: String,
    pub duration_minutes: String,
    pub total_marks: String,
    pub attempt_limit: AttemptLimit,
    pub shuffle_questions: bool,
    pub negative_marking: bool,
    pub negative_per_wrong: String,
}

/// Step 4 of the wizard. Importing questions is optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Import {
    /// Name of the document the questions were read from.
    pub source: Option<Box<str>>,
    pub questions: Vec<Question>,
}

/// Step 5 of the wizard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub visibility: Visibility,
    pub assigned_groups: Vec<String>,
}

/// Step 6 of the wizard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Media {
    pub cover_image_preview: String,
    pub tags: Vec<String>,
    pub difficulty_level: Difficulty,
    pub save_as_draft: bool,
}

/// The in-memory quiz configuration assembled by the wizard. Nothing here is
/// persisted until the whole draft is submitted at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizDraft {
    /// Identifier of the selected category. Empty until one is chosen.
    pub category: String,
    pub pricing: Pricing,
    pub basic: BasicSettings,
    pub import: Import,
    pub schedule: Schedule,
    pub media: Media,
}

/// Parses user input as a finite floating-point number.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|num| num.is_finite())
}

/// Parses user input as a strictly positive integer.
pub fn parse_positive(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|&num| num > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_form() {
        let draft = QuizDraft::default();
        assert!(draft.category.is_empty());
        assert_eq!(draft.pricing.kind, PricingType::Free);
        assert_eq!(draft.basic.attempt_limit, AttemptLimit::Unlimited);
        assert_eq!(draft.schedule.visibility, Visibility::Public);
        assert_eq!(draft.media.difficulty_level, Difficulty::Medium);
        assert!(!draft.media.save_as_draft);
    }

    #[test]
    fn parses_textual_choices() {
        assert_eq!("paid".parse(), Ok(PricingType::Paid));
        assert_eq!("1".parse(), Ok(AttemptLimit::Once));
        assert_eq!("private".parse(), Ok(Visibility::Private));
        assert_eq!("hard".parse(), Ok(Difficulty::Hard));
        assert_eq!("Paid".parse::<PricingType>(), Err(UnknownVariant));
        assert_eq!("twice".parse::<AttemptLimit>(), Err(UnknownVariant));
    }

    #[test]
    fn numeric_inputs() {
        assert_eq!(parse_decimal(" 10 "), Some(10.0));
        assert_eq!(parse_decimal("9.5"), Some(9.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_positive("30"), Some(30));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("abc"), None);
    }
}
