use crate::step::Step;
use core::fmt::{self, Display};
use model::{
    draft::{parse_decimal, parse_positive},
    BasicSettings, PricingType, QuizDraft, Visibility,
};

/// The first unmet requirement keeping a step from advancing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Category,
    Price,
    Title,
    Description,
    Duration,
    TotalMarks,
    Penalty,
    Schedule,
    Groups,
}

impl Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Category => "Please select a category to continue.",
            Self::Price => "Paid quizzes need a price greater than zero.",
            Self::Title => "The quiz needs a title.",
            Self::Description => "The quiz needs a description.",
            Self::Duration => "Duration must be a whole number of minutes.",
            Self::TotalMarks => "Total marks must be a whole number greater than zero.",
            Self::Penalty => "The negative marking penalty must be a non-negative number.",
            Self::Schedule => "Start and end dates and times are all required.",
            Self::Groups => "Private quizzes must be assigned to at least one group.",
        })
    }
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Basic settings are also edited outside the wizard, so their rules stand
/// on their own.
pub fn check_basic(basic: &BasicSettings) -> Result<(), Requirement> {
    if blank(&basic.title) {
        return Err(Requirement::Title);
    }
    if blank(&basic.description) {
        return Err(Requirement::Description);
    }
    if parse_positive(&basic.duration_minutes).is_none() {
        return Err(Requirement::Duration);
    }
    if parse_positive(&basic.total_marks).is_none() {
        return Err(Requirement::TotalMarks);
    }
    let penalty = &basic.negative_per_wrong;
    if basic.negative_marking && !blank(penalty) && !parse_decimal(penalty).is_some_and(|num| num >= 0.0) {
        return Err(Requirement::Penalty);
    }
    Ok(())
}

/// Checks the gate of `step` against the draft, reporting the first unmet
/// requirement.
pub fn check(draft: &QuizDraft, step: Step) -> Result<(), Requirement> {
    match step {
        Step::Category if blank(&draft.category) => Err(Requirement::Category),
        Step::Pricing => {
            let pricing = &draft.pricing;
            let valid = match pricing.kind {
                PricingType::Free => true,
                PricingType::Paid => parse_decimal(&pricing.price).is_some_and(|price| price > 0.0),
            };
            if valid {
                Ok(())
            } else {
                Err(Requirement::Price)
            }
        }
        Step::Basic => check_basic(&draft.basic),
        Step::Schedule => {
            let schedule = &draft.schedule;
            let times = [&schedule.start_date, &schedule.start_time, &schedule.end_date, &schedule.end_time];
            if times.into_iter().any(|text| blank(text)) {
                return Err(Requirement::Schedule);
            }
            if schedule.visibility == Visibility::Private && schedule.assigned_groups.is_empty() {
                return Err(Requirement::Groups);
            }
            Ok(())
        }
        Step::Category | Step::Import | Step::Media => Ok(()),
    }
}

/// Whether the wizard may move forward from `step`. Cheap enough to run after
/// every keystroke.
pub fn can_proceed(draft: &QuizDraft, step: Step) -> bool {
    check(draft, step).is_ok()
}
