use core::fmt::{self, Display};

/// The six screens of the wizard, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Category = 1,
    Pricing,
    Basic,
    Import,
    Schedule,
    Media,
}

impl Step {
    pub const FIRST: Self = Self::Category;
    pub const LAST: Self = Self::Media;
    pub const ALL: [Self; 6] = [Self::Category, Self::Pricing, Self::Basic, Self::Import, Self::Schedule, Self::Media];

    /// One-based position of the step.
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Category => "Category Selection",
            Self::Pricing => "Pricing & Access",
            Self::Basic => "Basic Settings",
            Self::Import => "Upload & Import",
            Self::Schedule => "Schedule & Visibility",
            Self::Media => "Media & Advanced",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Self::LAST.number(), self.title())
    }
}
