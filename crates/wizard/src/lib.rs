pub mod basic;
pub mod category;
pub mod controller;
pub mod edit;
pub mod error;
pub mod gate;
pub mod import;
pub mod step;
pub mod summary;

pub use controller::{Controller, Hooks};
pub use edit::Edit;
pub use step::Step;

use core::fmt::{self, Display};
use error::{Error, Result};
use model::{QuizDraft, QuizPayload};
use summary::Summary;

/// Where the wizard currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Editing(Step),
    /// Read-only recap awaiting confirmation.
    Summary,
    /// The create call is in flight.
    Submitting,
    /// Terminal. The draft has been submitted or abandoned.
    Closed,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing(step) => write!(f, "editing step {}", step.number()),
            Self::Summary => f.write_str("reviewing the summary"),
            Self::Submitting => f.write_str("submitting"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// Step sequencing and gating over a single [`QuizDraft`]. Performs no I/O;
/// [`Controller`] drives the network side.
#[derive(Debug)]
pub struct Wizard {
    draft: QuizDraft,
    stage: Stage,
}

impl Default for Wizard {
    fn default() -> Self {
        Self { draft: QuizDraft::default(), stage: Stage::Editing(Step::FIRST) }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn stage(&self) -> Stage {
        self.stage
    }

    pub const fn draft(&self) -> &QuizDraft {
        &self.draft
    }

    /// Whether Next is currently enabled.
    pub fn can_proceed(&self) -> bool {
        match self.stage {
            Stage::Editing(step) => gate::can_proceed(&self.draft, step),
            Stage::Summary => true,
            Stage::Submitting | Stage::Closed => false,
        }
    }

    /// Applies an edit to the slice owned by the active step.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        let owner = edit.step();
        match self.stage {
            Stage::Editing(step) if step == owner => {
                let draft = core::mem::take(&mut self.draft);
                self.draft = edit::reduce(draft, edit);
                Ok(())
            }
            Stage::Editing(_) => Err(Error::NotActive(owner)),
            stage => Err(Error::InvalidTransition(stage)),
        }
    }

    pub fn next(&mut self) -> Result<Stage> {
        let Stage::Editing(step) = self.stage else {
            return Err(Error::InvalidTransition(self.stage));
        };

        gate::check(&self.draft, step)?;
        self.stage = match step.next() {
            Some(next) => Stage::Editing(next),
            None => Stage::Summary,
        };
        log::debug!("Wizard moved from step {} to {}.", step.number(), self.stage);
        Ok(self.stage)
    }

    /// Goes back one step. Backing out of the first step cancels the wizard.
    pub fn back(&mut self) -> Result<Stage> {
        self.stage = match self.stage {
            Stage::Editing(step) => step.prev().map_or(Stage::Closed, Stage::Editing),
            Stage::Summary => Stage::Editing(Step::LAST),
            stage => return Err(Error::InvalidTransition(stage)),
        };
        Ok(self.stage)
    }

    /// Returns from the summary to the last step for corrections.
    pub fn edit_details(&mut self) -> Result<Stage> {
        if self.stage != Stage::Summary {
            return Err(Error::InvalidTransition(self.stage));
        }
        self.stage = Stage::Editing(Step::LAST);
        Ok(self.stage)
    }

    /// Abandons the draft from any non-terminal stage except mid-submission.
    pub fn cancel(&mut self) -> Result<()> {
        match self.stage {
            Stage::Editing(_) | Stage::Summary => {
                self.stage = Stage::Closed;
                Ok(())
            }
            stage => Err(Error::InvalidTransition(stage)),
        }
    }

    /// Confirms the summary and hands out the payload for the single create
    /// call. Every gate is re-checked first so a stale draft cannot slip
    /// through.
    pub fn begin_submit(&mut self) -> Result<QuizPayload> {
        if self.stage != Stage::Summary {
            return Err(Error::InvalidTransition(self.stage));
        }
        for step in Step::ALL {
            gate::check(&self.draft, step)?;
        }
        self.stage = Stage::Submitting;
        Ok(QuizPayload::from(&self.draft))
    }

    /// Records the outcome of the create call. Success is terminal; failure
    /// returns to the summary so the user may retry.
    pub fn finish_submit(&mut self, created: bool) -> Result<Stage> {
        if self.stage != Stage::Submitting {
            return Err(Error::InvalidTransition(self.stage));
        }
        self.stage = if created { Stage::Closed } else { Stage::Summary };
        Ok(self.stage)
    }

    pub fn summary<'a>(&'a self, category_name: Option<&'a str>) -> Summary<'a> {
        Summary { draft: &self.draft, category_name }
    }
}

#[cfg(test)]
mod tests {
    use super::{Stage, Step, Wizard};
    use crate::{
        edit::{BasicEdit, CategoryEdit, Edit, PricingEdit, ScheduleEdit},
        error::Error,
        gate::Requirement,
    };
    use model::{PricingType, Visibility};

    fn apply_all(wizard: &mut Wizard, edits: Vec<Edit>) {
        for edit in edits {
            wizard.apply(edit).unwrap();
        }
    }

    /// Fills every required field, walking the wizard up to the summary.
    fn completed() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.apply(CategoryEdit::Select("c1".into()).into()).unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();
        apply_all(
            &mut wizard,
            vec![
                BasicEdit::Title("Quiz A".into()).into(),
                BasicEdit::Description("d".into()).into(),
                BasicEdit::Duration("30".into()).into(),
                BasicEdit::TotalMarks("10".into()).into(),
            ],
        );
        wizard.next().unwrap();
        wizard.next().unwrap();
        apply_all(
            &mut wizard,
            vec![
                ScheduleEdit::StartDate("2025-02-01".into()).into(),
                ScheduleEdit::StartTime("09:00".into()).into(),
                ScheduleEdit::EndDate("2025-02-01".into()).into(),
                ScheduleEdit::EndTime("10:00".into()).into(),
            ],
        );
        wizard.next().unwrap();
        assert_eq!(wizard.next().unwrap(), Stage::Summary);
        wizard
    }

    #[test]
    fn blocked_gate_keeps_step() {
        let mut wizard = Wizard::new();
        assert!(!wizard.can_proceed());
        assert!(matches!(wizard.next(), Err(Error::Blocked(Requirement::Category))));
        assert_eq!(wizard.stage(), Stage::Editing(Step::Category));
    }

    #[test]
    fn gate_follows_every_edit() {
        let mut wizard = Wizard::new();
        wizard.apply(CategoryEdit::Select("c1".into()).into()).unwrap();
        wizard.next().unwrap();

        wizard.apply(PricingEdit::Kind(PricingType::Paid).into()).unwrap();
        assert!(!wizard.can_proceed());
        wizard.apply(PricingEdit::Price("1".into()).into()).unwrap();
        assert!(wizard.can_proceed());
        wizard.apply(PricingEdit::Price("".into()).into()).unwrap();
        assert!(!wizard.can_proceed());
        wizard.apply(PricingEdit::Price("10".into()).into()).unwrap();
        assert_eq!(wizard.next().unwrap(), Stage::Editing(Step::Basic));
    }

    #[test]
    fn edits_belong_to_active_step() {
        let mut wizard = Wizard::new();
        let err = wizard.apply(BasicEdit::Title("Early".into()).into()).unwrap_err();
        assert!(matches!(err, Error::NotActive(Step::Basic)));
        assert!(wizard.draft().basic.title.is_empty());
    }

    #[test]
    fn back_at_first_step_cancels() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.back().unwrap(), Stage::Closed);
        assert!(matches!(wizard.next(), Err(Error::InvalidTransition(Stage::Closed))));
        assert!(matches!(wizard.back(), Err(Error::InvalidTransition(Stage::Closed))));
    }

    #[test]
    fn back_keeps_entered_values() {
        let mut wizard = Wizard::new();
        wizard.apply(CategoryEdit::Select("c1".into()).into()).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.back().unwrap(), Stage::Editing(Step::Category));
        assert_eq!(wizard.draft().category, "c1");
    }

    #[test]
    fn private_schedule_needs_group() {
        let mut wizard = completed();
        wizard.edit_details().unwrap();
        wizard.back().unwrap();
        assert_eq!(wizard.stage(), Stage::Editing(Step::Schedule));

        wizard.apply(ScheduleEdit::Visibility(Visibility::Private).into()).unwrap();
        assert!(matches!(wizard.next(), Err(Error::Blocked(Requirement::Groups))));
        wizard.apply(ScheduleEdit::AddGroup("batch-a".into()).into()).unwrap();
        assert_eq!(wizard.next().unwrap(), Stage::Editing(Step::Media));
    }

    #[test]
    fn summary_round_trip() {
        let mut wizard = completed();
        assert!(wizard.apply(CategoryEdit::Select("c2".into()).into()).is_err());
        assert_eq!(wizard.edit_details().unwrap(), Stage::Editing(Step::Media));
        assert_eq!(wizard.next().unwrap(), Stage::Summary);
        assert_eq!(wizard.back().unwrap(), Stage::Editing(Step::Media));
    }

    #[test]
    fn submission_lifecycle() {
        let mut wizard = completed();
        let payload = wizard.begin_submit().unwrap();
        assert_eq!(payload.duration, 30);
        assert_eq!(payload.price, 0.0);
        assert_eq!(wizard.stage(), Stage::Submitting);
        assert!(wizard.cancel().is_err());
        assert!(wizard.begin_submit().is_err());

        assert_eq!(wizard.finish_submit(false).unwrap(), Stage::Summary);
        wizard.begin_submit().unwrap();
        assert_eq!(wizard.finish_submit(true).unwrap(), Stage::Closed);
        assert!(wizard.finish_submit(true).is_err());
    }

    #[test]
    fn cannot_submit_from_steps() {
        let mut wizard = Wizard::new();
        assert!(matches!(wizard.begin_submit(), Err(Error::InvalidTransition(Stage::Editing(Step::Category)))));
        assert!(wizard.edit_details().is_err());
    }
}
