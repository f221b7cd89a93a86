use core::fmt::{self, Display};
use model::{AttemptLimit, PricingType, QuizDraft};

/// Read-only recap of the whole draft shown before the final confirmation.
pub struct Summary<'a> {
    pub draft: &'a QuizDraft,
    /// Display name of the selected category, if known.
    pub category_name: Option<&'a str>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn or_dash(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let QuizDraft { category, pricing, basic, import, schedule, media } = self.draft;

        match self.category_name {
            Some(name) => writeln!(f, "Category:          {name} ({category})")?,
            None => writeln!(f, "Category:          {}", or_dash(category))?,
        }

        match pricing.kind {
            PricingType::Free => writeln!(f, "Pricing:           Free")?,
            PricingType::Paid => writeln!(f, "Pricing:           Paid ({})", or_dash(&pricing.price))?,
        }
        if !pricing.coupon_code.trim().is_empty() {
            writeln!(f, "Coupon code:       {}", pricing.coupon_code.trim())?;
        }
        writeln!(f, "Offline payment:   {}", yes_no(pricing.allow_offline_payment))?;

        writeln!(f, "Title:             {}", or_dash(&basic.title))?;
        writeln!(f, "Description:       {}", or_dash(&basic.description))?;
        writeln!(f, "Duration:          {} minutes", or_dash(&basic.duration_minutes))?;
        writeln!(f, "Total marks:       {}", or_dash(&basic.total_marks))?;
        let attempts = match basic.attempt_limit {
            AttemptLimit::Unlimited => "Unlimited",
            AttemptLimit::Once => "1",
        };
        writeln!(f, "Attempts:          {attempts}")?;
        writeln!(f, "Shuffle questions: {}", yes_no(basic.shuffle_questions))?;
        if basic.negative_marking {
            writeln!(f, "Negative marking:  Yes ({} per wrong answer)", or_dash(&basic.negative_per_wrong))?;
        } else {
            writeln!(f, "Negative marking:  No")?;
        }

        match &import.source {
            Some(source) => writeln!(f, "Questions:         {} imported from {source}", import.questions.len())?,
            None => writeln!(f, "Questions:         None imported")?,
        }

        writeln!(f, "Starts:            {} {}", or_dash(&schedule.start_date), or_dash(&schedule.start_time))?;
        writeln!(f, "Ends:              {} {}", or_dash(&schedule.end_date), or_dash(&schedule.end_time))?;
        if schedule.assigned_groups.is_empty() {
            writeln!(f, "Visibility:        {}", schedule.visibility)?;
        } else {
            writeln!(f, "Visibility:        {} ({})", schedule.visibility, schedule.assigned_groups.join(", "))?;
        }

        writeln!(f, "Cover image:       {}", or_dash(&media.cover_image_preview))?;
        if media.tags.is_empty() {
            writeln!(f, "Tags:              -")?;
        } else {
            writeln!(f, "Tags:              {}", media.tags.join(", "))?;
        }
        writeln!(f, "Difficulty:        {}", media.difficulty_level)?;
        write!(f, "Save as draft:     {}", yes_no(media.save_as_draft))
    }
}

#[cfg(test)]
mod tests {
    use super::Summary;
    use model::{PricingType, QuizDraft, Visibility};

    #[test]
    fn recaps_every_slice() {
        let mut draft = QuizDraft::default();
        draft.category = "c1".into();
        draft.pricing.kind = PricingType::Paid;
        draft.pricing.price = "10".into();
        draft.basic.title = "Quiz A".into();
        draft.basic.duration_minutes = "30".into();
        draft.schedule.visibility = Visibility::Private;
        draft.schedule.assigned_groups = vec!["batch-a".into(), "batch-b".into()];
        draft.media.tags = vec!["physics".into()];

        let text = Summary { draft: &draft, category_name: Some("Science") }.to_string();
        assert!(text.contains("Category:          Science (c1)"));
        assert!(text.contains("Pricing:           Paid (10)"));
        assert!(text.contains("Title:             Quiz A"));
        assert!(text.contains("Duration:          30 minutes"));
        assert!(text.contains("Description:       -"));
        assert!(text.contains("Visibility:        private (batch-a, batch-b)"));
        assert!(text.contains("Tags:              physics"));
        assert!(text.ends_with("Save as draft:     No"));
    }
}
