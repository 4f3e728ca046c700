use serde::{Deserialize, Serialize};
use std::fmt;

/// One question/answer pair lifted from an FAQ page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
}

impl FaqRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        FaqRecord {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// A record needs a question with visible text; the answer may be empty.
    pub fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
    }
}

impl fmt::Display for FaqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Q: {}", self.question)?;
        if self.answer.is_empty() {
            writeln!(f, "A: None")
        } else {
            writeln!(f, "A: {}", self.answer.replace('\n', "\n   "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validity_requires_question_text() {
        assert!(FaqRecord::new("What is it?", "").is_valid());
        assert!(!FaqRecord::new("  \n", "An answer").is_valid());
    }

    #[test]
    fn test_display() {
        let record = FaqRecord::new("Q1", "");
        assert_eq!(record.to_string(), "Q: Q1\nA: None\n");

        let record = FaqRecord::new("Q2", "A2");
        assert_eq!(record.to_string(), "Q: Q2\nA: A2\n");
    }
}
