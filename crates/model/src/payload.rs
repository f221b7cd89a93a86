use crate::{
    draft::{parse_decimal, AttemptLimit, BasicSettings, Difficulty, PricingType, QuizDraft, Visibility},
    quiz::Question,
};
use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Flattened body of `POST /api/admin/quizzes`. Numeric form inputs are coerced
/// to JSON numbers here, never earlier.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub category: String,
    pub pricing_type: PricingType,
    pub price: f64,
    pub coupon_code: String,
    pub allow_offline_payment: bool,
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub total_marks: u32,
    pub attempt_limit: AttemptLimit,
    pub shuffle_questions: bool,
    pub negative_marking: bool,
    pub negative_per_wrong: f64,
    pub questions: Vec<Question>,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub visibility: Visibility,
    pub assigned_groups: Vec<String>,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub difficulty_level: Difficulty,
    pub save_as_draft: bool,
}

/// Coerces raw input the way a form would: anything unparsable becomes zero.
fn coerce_decimal(text: &str) -> f64 {
    parse_decimal(text).unwrap_or_default()
}

fn coerce_integer(text: &str) -> u32 {
    text.trim().parse().unwrap_or_default()
}

impl From<&QuizDraft> for QuizPayload {
    fn from(draft: &QuizDraft) -> Self {
        let QuizDraft { category, pricing, basic, import, schedule, media } = draft;
        let price = match pricing.kind {
            PricingType::Free => 0.0,
            PricingType::Paid => coerce_decimal(&pricing.price),
        };
        let negative_per_wrong = if basic.negative_marking { coerce_decimal(&basic.negative_per_wrong) } else { 0.0 };
        Self {
            category: category.trim().into(),
            pricing_type: pricing.kind,
            price,
            coupon_code: pricing.coupon_code.trim().into(),
            allow_offline_payment: pricing.allow_offline_payment,
            title: basic.title.trim().into(),
            description: basic.description.trim().into(),
            duration: coerce_integer(&basic.duration_minutes),
            total_marks: coerce_integer(&basic.total_marks),
            attempt_limit: basic.attempt_limit,
            shuffle_questions: basic.shuffle_questions,
            negative_marking: basic.negative_marking,
            negative_per_wrong,
            questions: import.questions.clone(),
            start_date: schedule.start_date.clone(),
            start_time: schedule.start_time.clone(),
            end_date: schedule.end_date.clone(),
            end_time: schedule.end_time.clone(),
            visibility: schedule.visibility,
            assigned_groups: schedule.assigned_groups.clone(),
            cover_image: media.cover_image_preview.clone(),
            tags: media.tags.clone(),
            difficulty_level: media.difficulty_level,
            save_as_draft: media.save_as_draft,
        }
    }
}

/// Wire form of the basic settings of an existing quiz, as read by
/// `GET /api/admin/quizzes/:id` and written by `PUT /api/admin/quizzes/:id`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicPatch {
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub total_marks: u32,
    pub attempt_limit: AttemptLimit,
    pub shuffle_questions: bool,
    pub negative_marking: bool,
    pub negative_per_wrong: f64,
}

impl From<&BasicSettings> for BasicPatch {
    fn from(basic: &BasicSettings) -> Self {
        Self {
            title: basic.title.trim().into(),
            description: basic.description.trim().into(),
            duration: coerce_integer(&basic.duration_minutes),
            total_marks: coerce_integer(&basic.total_marks),
            attempt_limit: basic.attempt_limit,
            shuffle_questions: basic.shuffle_questions,
            negative_marking: basic.negative_marking,
            negative_per_wrong: coerce_decimal(&basic.negative_per_wrong),
        }
    }
}

impl From<BasicPatch> for BasicSettings {
    fn from(patch: BasicPatch) -> Self {
        use alloc::string::ToString;
        let BasicPatch {
            title,
            description,
            duration,
            total_marks,
            attempt_limit,
            shuffle_questions,
            negative_marking,
            negative_per_wrong,
        } = patch;
        let blank_if_zero = |num: u32| if num == 0 { String::new() } else { num.to_string() };
        Self {
            title,
            description,
            duration_minutes: blank_if_zero(duration),
            total_marks: blank_if_zero(total_marks),
            attempt_limit,
            shuffle_questions,
            negative_marking,
            negative_per_wrong: negative_per_wrong.to_string(),
        }
    }
}
