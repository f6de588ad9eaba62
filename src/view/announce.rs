//! Messages for the assistive-technology live region.

/// How urgently a screen reader should speak an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Spoken when the reader is idle ("status" role).
    Polite,
    /// Interrupts current speech ("alert" role).
    Assertive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub politeness: Politeness,
    pub message: String,
}

impl Announcement {
    pub fn polite(message: impl Into<String>) -> Self {
        Self {
            politeness: Politeness::Polite,
            message: message.into(),
        }
    }

    pub fn assertive(message: impl Into<String>) -> Self {
        Self {
            politeness: Politeness::Assertive,
            message: message.into(),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.politeness == Politeness::Assertive
    }
}

/// "1 document" / "3 documents".
pub fn count_phrase(count: usize) -> String {
    format!(
        "{} document{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_phrase_pluralizes() {
        assert_eq!(count_phrase(0), "0 documents");
        assert_eq!(count_phrase(1), "1 document");
        assert_eq!(count_phrase(12), "12 documents");
    }

    #[test]
    fn politeness_constructors() {
        assert!(Announcement::assertive("bad").is_alert());
        assert!(!Announcement::polite("ok").is_alert());
    }
}
