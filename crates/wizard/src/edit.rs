//! Field updates reported by each step. Every step owns one slice of the
//! draft, and [`reduce`] is the only way the draft changes.

use crate::step::Step;
use model::{
    AttemptLimit, BasicSettings, Difficulty, Import, Media, Pricing, PricingType, Question, QuizDraft, Schedule,
    Visibility,
};

#[derive(Clone, Debug, PartialEq)]
pub enum CategoryEdit {
    Select(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PricingEdit {
    Kind(PricingType),
    Price(String),
    Coupon(String),
    OfflinePayment(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub enum BasicEdit {
    Title(String),
    Description(String),
    Duration(String),
    TotalMarks(String),
    AttemptLimit(AttemptLimit),
    Shuffle(bool),
    NegativeMarking(bool),
    NegativePerWrong(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportEdit {
    Load { source: Box<str>, questions: Vec<Question> },
    Clear,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScheduleEdit {
    StartDate(String),
    StartTime(String),
    EndDate(String),
    EndTime(String),
    Visibility(Visibility),
    AddGroup(String),
    RemoveGroup(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MediaEdit {
    CoverImage(String),
    AddTag(String),
    RemoveTag(String),
    Difficulty(Difficulty),
    SaveAsDraft(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    Category(CategoryEdit),
    Pricing(PricingEdit),
    Basic(BasicEdit),
    Import(ImportEdit),
    Schedule(ScheduleEdit),
    Media(MediaEdit),
}

impl Edit {
    /// The step that owns the slice this edit touches.
    pub const fn step(&self) -> Step {
        match self {
            Self::Category(_) => Step::Category,
            Self::Pricing(_) => Step::Pricing,
            Self::Basic(_) => Step::Basic,
            Self::Import(_) => Step::Import,
            Self::Schedule(_) => Step::Schedule,
            Self::Media(_) => Step::Media,
        }
    }
}

macro_rules! impl_from_edit {
    ($($variant:ident($inner:ty)),+ $(,)?) => {
        $(impl From<$inner> for Edit {
            fn from(edit: $inner) -> Self {
                Self::$variant(edit)
            }
        })+
    };
}

impl_from_edit! {
    Category(CategoryEdit),
    Pricing(PricingEdit),
    Basic(BasicEdit),
    Import(ImportEdit),
    Schedule(ScheduleEdit),
    Media(MediaEdit),
}

/// Appends a trimmed entry unless it is blank or already present.
fn add_unique(list: &mut Vec<String>, entry: String) {
    let entry = entry.trim();
    if !entry.is_empty() && !list.iter().any(|item| item == entry) {
        list.push(entry.into());
    }
}

fn remove_entry(list: &mut Vec<String>, entry: &str) {
    let entry = entry.trim();
    list.retain(|item| item != entry);
}

impl PricingEdit {
    pub fn apply(self, pricing: &mut Pricing) {
        match self {
            Self::Kind(kind) => pricing.kind = kind,
            Self::Price(price) => pricing.price = price,
            Self::Coupon(code) => pricing.coupon_code = code,
            Self::OfflinePayment(allow) => pricing.allow_offline_payment = allow,
        }
    }
}

impl BasicEdit {
    pub fn apply(self, basic: &mut BasicSettings) {
        match self {
            Self::Title(title) => basic.title = title,
            Self::Description(text) => basic.description = text,
            Self::Duration(minutes) => basic.duration_minutes = minutes,
            Self::TotalMarks(marks) => basic.total_marks = marks,
            Self::AttemptLimit(limit) => basic.attempt_limit = limit,
            Self::Shuffle(on) => basic.shuffle_questions = on,
            Self::NegativeMarking(on) => basic.negative_marking = on,
            Self::NegativePerWrong(penalty) => basic.negative_per_wrong = penalty,
        }
    }
}

impl ImportEdit {
    pub fn apply(self, import: &mut Import) {
        *import = match self {
            Self::Load { source, questions } => Import { source: Some(source), questions },
            Self::Clear => Import::default(),
        };
    }
}

impl ScheduleEdit {
    pub fn apply(self, schedule: &mut Schedule) {
        match self {
            Self::StartDate(date) => schedule.start_date = date,
            Self::StartTime(time) => schedule.start_time = time,
            Self::EndDate(date) => schedule.end_date = date,
            Self::EndTime(time) => schedule.end_time = time,
            Self::Visibility(visibility) => schedule.visibility = visibility,
            Self::AddGroup(group) => add_unique(&mut schedule.assigned_groups, group),
            Self::RemoveGroup(group) => remove_entry(&mut schedule.assigned_groups, &group),
        }
    }
}

impl MediaEdit {
    pub fn apply(self, media: &mut Media) {
        match self {
            Self::CoverImage(image) => media.cover_image_preview = image,
            Self::AddTag(tag) => add_unique(&mut media.tags, tag),
            Self::RemoveTag(tag) => remove_entry(&mut media.tags, &tag),
            Self::Difficulty(level) => media.difficulty_level = level,
            Self::SaveAsDraft(on) => media.save_as_draft = on,
        }
    }
}

/// Produces the next draft from the previous one and a single edit.
pub fn reduce(mut draft: QuizDraft, edit: Edit) -> QuizDraft {
    match edit {
        Edit::Category(CategoryEdit::Select(id)) => draft.category = id,
        Edit::Pricing(edit) => edit.apply(&mut draft.pricing),
        Edit::Basic(edit) => edit.apply(&mut draft.basic),
        Edit::Import(edit) => edit.apply(&mut draft.import),
        Edit::Schedule(edit) => edit.apply(&mut draft.schedule),
        Edit::Media(edit) => edit.apply(&mut draft.media),
    }
    draft
}
