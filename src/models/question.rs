// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_answer_index))]
pub struct Question {
    /// The text content of the question.
    #[validate(length(min = 1, max = 4000))]
    pub text: String,

    /// Ordered list of options (e.g., ["A) 28", "B) 30"]).
    #[validate(length(min = 2, max = 10), custom(function = validate_options))]
    pub options: Vec<String>,

    /// Index of the correct option.
    pub answer: usize,
}

impl Question {
    /// Whether `given` selects the correct option. Negative indices never match.
    pub fn is_answered_by(&self, given: i64) -> bool {
        usize::try_from(given).is_ok_and(|given| given == self.answer)
    }
}

/// DTO for sending a question to exam takers (excludes the answer).
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    for opt in options {
        if opt.trim().is_empty() {
            return Err(ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_answer_index(question: &Question) -> Result<(), ValidationError> {
    if question.answer >= question.options.len() {
        return Err(ValidationError::new("answer_index_out_of_range"));
    }
    Ok(())
}

/// Read-only question bank keyed by subject, then grade.
#[derive(Debug, Default)]
pub struct QuestionPool {
    subjects: BTreeMap<String, BTreeMap<u8, Vec<Question>>>,
}

impl QuestionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: &str, grade: u8, questions: Vec<Question>) {
        self.subjects
            .entry(subject.to_string())
            .or_default()
            .entry(grade)
            .or_default()
            .extend(questions);
    }

    pub fn subjects(&self) -> Vec<&str> {
        self.subjects.keys().map(String::as_str).collect()
    }

    pub fn questions(&self, subject: &str, grade: u8) -> &[Question] {
        self.subjects
            .get(subject)
            .and_then(|grades| grades.get(&grade))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lists every (subject, grade) bucket matching the optional filters.
    pub fn search(&self, query: &PoolQuery) -> Vec<PoolEntry<'_>> {
        self.subjects
            .iter()
            .filter(|(subject, _)| query.subject.as_ref().is_none_or(|s| s == *subject))
            .flat_map(|(subject, grades)| {
                grades
                    .iter()
                    .filter(|(grade, _)| query.grade.is_none_or(|g| g == **grade))
                    .map(move |(grade, questions)| PoolEntry {
                        subject,
                        grade: *grade,
                        questions,
                    })
            })
            .collect()
    }
}

/// Query parameters for browsing the question pool.
#[derive(Debug, Default, Deserialize)]
pub struct PoolQuery {
    pub subject: Option<String>,
    pub grade: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct PoolEntry<'a> {
    pub subject: &'a str,
    pub grade: u8,
    pub questions: &'a [Question],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: usize) -> Question {
        Question {
            text: "2 + 2 = ?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            answer,
        }
    }

    #[test]
    fn answer_must_point_at_an_option() {
        assert!(question(1).validate().is_ok());
        assert!(question(3).validate().is_err());
    }

    #[test]
    fn blank_options_are_rejected() {
        let mut q = question(0);
        q.options[2] = "   ".to_string();
        assert!(q.validate().is_err());
    }

    #[test]
    fn pool_search_filters_by_subject_and_grade() {
        let mut pool = QuestionPool::new();
        pool.insert("Mathematics", 9, vec![question(1)]);
        pool.insert("Mathematics", 10, vec![question(1), question(0)]);
        pool.insert("Physics", 9, vec![question(2)]);

        let all = pool.search(&PoolQuery::default());
        assert_eq!(all.len(), 3);

        let math = pool.search(&PoolQuery {
            subject: Some("Mathematics".to_string()),
            grade: None,
        });
        assert_eq!(math.len(), 2);

        let ninth = pool.search(&PoolQuery {
            subject: None,
            grade: Some(9),
        });
        assert!(ninth.iter().all(|e| e.grade == 9));
        assert_eq!(ninth.len(), 2);

        assert_eq!(pool.questions("Mathematics", 10).len(), 2);
        assert!(pool.questions("History", 9).is_empty());
        assert_eq!(pool.subjects(), vec!["Mathematics", "Physics"]);
    }
}
