use std::sync::Arc;

use crate::{
    config::Config,
    models::question::QuestionPool,
    store::{CourseRepository, ExamRepository, InMemoryStore, ResultRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub exams: Arc<dyn ExamRepository>,
    pub results: Arc<dyn ResultRepository>,
    pub question_pool: Arc<QuestionPool>,
    pub config: Config,
}

impl AppState {
    /// Wires every repository to one shared in-memory store.
    pub fn in_memory(config: Config, store: Arc<InMemoryStore>, question_pool: QuestionPool) -> Self {
        Self {
            users: store.clone(),
            courses: store.clone(),
            exams: store.clone(),
            results: store,
            question_pool: Arc::new(question_pool),
            config,
        }
    }
}

