#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod category;
pub mod draft;
pub mod payload;
pub mod quiz;

pub use category::{Category, NewCategory};
pub use draft::{
    AttemptLimit, BasicSettings, Difficulty, Import, Media, Pricing, PricingType, QuizDraft, Schedule, Visibility,
};
pub use payload::{BasicPatch, QuizPayload};
pub use quiz::Question;
