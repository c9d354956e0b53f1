// src/models/exam.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{PublicQuestion, Question};

/// A graded collection of ordered questions.
/// Answers are submitted positionally, so question order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub course_id: i64,
    pub grade: u8,
    pub questions: Vec<Question>,
}

impl Exam {
    /// Number of positions where the submitted index equals the answer key.
    /// Positions past the end of `answers` earn nothing; extra answers are ignored.
    pub fn correct_count(&self, answers: &[i64]) -> usize {
        self.questions
            .iter()
            .zip(answers)
            .filter(|(question, given)| question.is_answered_by(**given))
            .count()
    }

    /// Question-by-question breakdown of a submission, answer key included.
    pub fn review(&self, answers: &[i64]) -> Vec<GradedQuestion> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let given = answers.get(i).copied();
                GradedQuestion {
                    text: question.text.clone(),
                    options: question.options.clone(),
                    answer: question.answer,
                    given,
                    correct: given.is_some_and(|given| question.is_answered_by(given)),
                }
            })
            .collect()
    }

    /// Percentage score, rounded down. An exam without questions scores 0.
    pub fn score(&self, answers: &[i64]) -> u8 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        (100 * self.correct_count(answers) / total) as u8
    }
}

/// DTO for exam takers: the answer key is stripped.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicExam {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub course_id: i64,
    pub grade: u8,
    pub questions: Vec<PublicQuestion>,
}

impl From<&Exam> for PublicExam {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title.clone(),
            description: exam.description.clone(),
            course_id: exam.course_id,
            grade: exam.grade,
            questions: exam.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}

/// One question of a submitted attempt. `given` is `None` when the
/// submission stopped before this position.
#[derive(Debug, Serialize, Deserialize)]
pub struct GradedQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub answer: usize,
    pub given: Option<i64>,
    pub correct: bool,
}

/// Query parameters for listing exams. Absent filters match everything.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExamFilter {
    pub course_id: Option<i64>,
    pub grade: Option<u8>,
}

impl ExamFilter {
    pub fn matches(&self, exam: &Exam) -> bool {
        self.course_id.is_none_or(|id| id == exam.course_id)
            && self.grade.is_none_or(|grade| grade == exam.grade)
    }
}

/// Mutable fields of an exam, shared by create and replace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExamPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    pub course_id: i64,
    #[validate(range(min = 9, max = 12, message = "Grade must be between 9 and 12."))]
    pub grade: u8,
    #[validate(length(min = 1, message = "An exam needs at least one question."), nested)]
    pub questions: Vec<Question>,
}

/// DTO for creating an exam. The id is assigned when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(range(min = 1))]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    pub course_id: i64,
    #[validate(range(min = 9, max = 12, message = "Grade must be between 9 and 12."))]
    pub grade: u8,
    #[validate(length(min = 1, message = "An exam needs at least one question."), nested)]
    pub questions: Vec<Question>,
}

impl CreateExamRequest {
    pub fn into_parts(self) -> (Option<i64>, ExamPayload) {
        (
            self.id,
            ExamPayload {
                title: self.title,
                description: self.description,
                course_id: self.course_id,
                grade: self.grade,
                questions: self.questions,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(answer_key: &[usize]) -> Exam {
        Exam {
            id: 1,
            title: "Grade 9 Mathematics Practice".to_string(),
            description: String::new(),
            course_id: 1,
            grade: 9,
            questions: answer_key
                .iter()
                .enumerate()
                .map(|(i, &answer)| Question {
                    text: format!("Question {}", i + 1),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    answer,
                })
                .collect(),
        }
    }

    #[test]
    fn answer_key_scores_full_marks() {
        let exam = exam(&[1, 0, 3, 2]);
        assert_eq!(exam.score(&[1, 0, 3, 2]), 100);
    }

    #[test]
    fn all_wrong_scores_zero() {
        let exam = exam(&[1, 0, 3, 2]);
        assert_eq!(exam.score(&[0, 1, 2, 3]), 0);
        assert_eq!(exam.score(&[]), 0);
    }

    #[test]
    fn short_submission_only_scores_covered_positions() {
        let exam = exam(&[1, 0, 3, 2]);
        assert_eq!(exam.correct_count(&[1, 0]), 2);
        assert_eq!(exam.score(&[1, 0]), 50);
    }

    #[test]
    fn score_rounds_down() {
        let exam = exam(&[0, 0, 0]);
        // 2/3 = 66.67%
        assert_eq!(exam.score(&[0, 0, 1]), 66);
        // 1/3 = 33.33%
        assert_eq!(exam.score(&[0, 1, 1]), 33);
    }

    #[test]
    fn extra_and_negative_answers_are_harmless() {
        let exam = exam(&[2, 1]);
        assert_eq!(exam.score(&[2, 1, 0, 0, 0]), 100);
        assert_eq!(exam.score(&[-1, 1]), 50);
    }

    #[test]
    fn empty_exam_scores_zero() {
        assert_eq!(exam(&[]).score(&[0, 1]), 0);
    }

    #[test]
    fn filter_matches_on_both_fields() {
        let exam = exam(&[0]);
        assert!(ExamFilter::default().matches(&exam));
        assert!(ExamFilter { course_id: Some(1), grade: Some(9) }.matches(&exam));
        assert!(!ExamFilter { course_id: Some(2), grade: None }.matches(&exam));
        assert!(!ExamFilter { course_id: None, grade: Some(10) }.matches(&exam));
    }

    #[test]
    fn public_view_hides_answer_key() {
        let exam = exam(&[3]);
        let json = serde_json::to_value(PublicExam::from(&exam)).unwrap();
        assert!(json["questions"][0].get("answer").is_none());
        assert_eq!(json["questions"][0]["options"][3], "D");
    }

    #[test]
    fn review_marks_each_position() {
        let exam = exam(&[1, 0, 3]);
        let review = exam.review(&[1, 2]);

        assert_eq!(review.len(), 3);
        assert!(review[0].correct);
        assert_eq!(review[1].answer, 0);
        assert_eq!(review[1].given, Some(2));
        assert!(!review[1].correct);
        assert_eq!(review[2].given, None);
        assert!(!review[2].correct);
    }

    #[test]
    fn replace_payload_defaults_description() {
        let payload: ExamPayload = serde_json::from_value(serde_json::json!({
            "title": "Quiz",
            "course_id": 1,
            "grade": 9,
            "questions": [{ "text": "1 + 1", "options": ["1", "2"], "answer": 1 }]
        }))
        .unwrap();
        assert_eq!(payload.description, "");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_request_requires_questions() {
        let request = CreateExamRequest {
            id: None,
            title: "Empty".to_string(),
            description: String::new(),
            course_id: 1,
            grade: 9,
            questions: Vec::new(),
        };
        assert!(request.validate().is_err());
    }
}
