// src/seed.rs

use chrono::Utc;

use crate::{
    config::{Config, MAX_GRADE, MIN_GRADE},
    error::AppError,
    models::{
        course::CoursePayload,
        exam::ExamPayload,
        question::{Question, QuestionPool},
        result::ExamResult,
        user::{Role, User},
    },
    state::AppState,
    utils::hash::hash_password,
};

/// Subjects in the pool with the prefix used for their generated option labels.
const SUBJECTS: [(&str, &str); 12] = [
    ("Mathematics", "Math"),
    ("Physics", "Phys"),
    ("Chemistry", "Chem"),
    ("Biology", "Bio"),
    ("Literature", "Lit"),
    ("History", "Hist"),
    ("Geography", "Geo"),
    ("Philosophy", "Phil"),
    ("Religious Culture", "Rel"),
    ("English", "En"),
    ("German", "De"),
    ("French", "Fr"),
];

const QUESTIONS_PER_BUCKET: usize = 20;

fn question(text: &str, options: &[&str], answer: usize) -> Question {
    Question {
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer,
    }
}

/// Hand-written opening questions for the grade 9 mathematics bucket.
fn grade_nine_math() -> Vec<Question> {
    vec![
        question(
            "A = {1, 2, 3, 5, 9} and B = {2, 3, 10}. What is the sum of the elements of A ∩ B?",
            &["A) 3", "B) 5", "C) 7", "D) 10", "E) 12"],
            1,
        ),
        question(
            "Which of the following numbers lies between 2 and 3 on the number line?",
            &["A) √3", "B) √5", "C) √10", "D) √2", "E) √12"],
            1,
        ),
        question(
            "If 3x - 7 = 11, what is x?",
            &["A) 4", "B) 5", "C) 6", "D) 7", "E) 8"],
            2,
        ),
        question(
            "How many elements does the power set of a 4-element set have?",
            &["A) 4", "B) 8", "C) 12", "D) 16", "E) 32"],
            3,
        ),
        question(
            "Which statement is the negation of \"every student passed\"?",
            &[
                "A) No student passed",
                "B) Some student did not pass",
                "C) Every student failed",
                "D) Some student passed",
                "E) Exactly one student failed",
            ],
            1,
        ),
    ]
}

/// Fills a bucket up to `QUESTIONS_PER_BUCKET` with numbered placeholder questions.
fn generated(subject: &str, prefix: &str, grade: u8, start: usize) -> Vec<Question> {
    let offset = usize::from(grade - MIN_GRADE) * 10;
    (start..QUESTIONS_PER_BUCKET)
        .map(|i| {
            let options: Vec<String> = ["A", "B", "C", "D"]
                .iter()
                .map(|letter| format!("{prefix}{letter}{}", i + offset))
                .collect();
            Question {
                text: format!("Grade {grade} {subject} Question {}", i + 1),
                options,
                answer: i % 4,
            }
        })
        .collect()
}

/// Builds the read-only question bank: every subject for grades 9-12.
pub fn question_pool() -> QuestionPool {
    let mut pool = QuestionPool::new();
    for (subject, prefix) in SUBJECTS {
        for grade in MIN_GRADE..=MAX_GRADE {
            let mut questions = if subject == "Mathematics" && grade == 9 {
                grade_nine_math()
            } else {
                Vec::new()
            };
            questions.extend(generated(subject, prefix, grade, questions.len()));
            pool.insert(subject, grade, questions);
        }
    }
    pool
}

/// Creates the configured admin account if it does not exist yet.
pub async fn seed_admin_user(state: &AppState, config: &Config) -> Result<(), AppError> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if state.users.find_user(username).await.is_none() {
            tracing::info!("Seeding admin user: {}", username);
            state
                .users
                .insert_user(User {
                    username: username.clone(),
                    full_name: None,
                    email: None,
                    disabled: false,
                    role: Role::Admin,
                    grade: None,
                    hashed_password: hash_password(password)?,
                })
                .await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}

/// Loads the demo dataset: three accounts, three courses, three exams drawn
/// from the pool and a few historical results.
pub async fn seed_demo_data(state: &AppState) -> Result<(), AppError> {
    let accounts = [
        ("admin", "Admin User", "admin123", Role::Admin, None),
        ("student", "Student User", "student123", Role::Student, Some(9)),
        ("student2", "Student Two", "student2123", Role::Student, Some(10)),
    ];

    for (username, full_name, password, role, grade) in accounts {
        if state.users.find_user(username).await.is_some() {
            continue;
        }
        state
            .users
            .insert_user(User {
                username: username.to_string(),
                full_name: Some(full_name.to_string()),
                email: Some(format!("{username}@example.com")),
                disabled: false,
                role,
                grade,
                hashed_password: hash_password(password)?,
            })
            .await?;
    }

    let courses = [
        (1, "Mathematics", "Mathematics department courses"),
        (2, "Physics", "Physics department courses"),
        (3, "Chemistry", "Chemistry department courses"),
    ];
    for (id, name, description) in courses {
        state
            .courses
            .insert_course(
                Some(id),
                CoursePayload {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                },
            )
            .await?;
    }

    let exams = [
        (1, "Mathematics", 1, 9),
        (2, "Physics", 2, 10),
        (3, "Chemistry", 3, 11),
    ];
    for (id, subject, course_id, grade) in exams {
        state
            .exams
            .insert_exam(
                Some(id),
                ExamPayload {
                    title: format!("Grade {grade} {subject} Practice Exam"),
                    description: format!("Grade {grade} {} practice exam", subject.to_lowercase()),
                    course_id,
                    grade,
                    questions: state.question_pool.questions(subject, grade).to_vec(),
                },
            )
            .await?;
    }

    let history = [
        ("student", 1, 85, vec![1, 1]),
        ("student", 2, 90, vec![0]),
        ("student2", 3, 75, vec![0]),
    ];
    for (username, exam_id, score, answers) in history {
        state
            .results
            .append_result(ExamResult {
                username: username.to_string(),
                exam_id,
                score,
                answers,
                submitted_at: Utc::now(),
            })
            .await;
    }

    tracing::info!("Demo data loaded.");
    Ok(())
}
