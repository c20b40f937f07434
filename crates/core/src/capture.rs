use thiserror::Error;

use crate::model::{Task, MAX_TASK_LEN};

/// Validation failures raised while capturing a task. These are the only
/// errors a user ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Task cannot be empty")]
    EmptyInput,
    #[error("Task cannot exceed {} characters", MAX_TASK_LEN)]
    TooLong,
    #[error("Task already exists")]
    DuplicateTask,
}

/// Trim `raw` and check it against the existing tasks. Returns the text that
/// should be stored.
pub fn validate_text<'a>(raw: &'a str, existing: &[Task]) -> Result<&'a str, CaptureError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CaptureError::EmptyInput);
    }
    if text.chars().count() > MAX_TASK_LEN {
        return Err(CaptureError::TooLong);
    }
    let needle = text.to_lowercase();
    if existing
        .iter()
        .any(|task| task.text.to_lowercase() == needle)
    {
        return Err(CaptureError::DuplicateTask);
    }
    Ok(text)
}
