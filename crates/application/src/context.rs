use tutorhub_core::entities::users::Role;

use crate::error::{AppError, AppResult};

/// Identity of the authenticated user a use case runs on behalf of.
///
/// Built from verified JWT claims at the HTTP layer; use cases never
/// look at raw tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_tutor(&self) -> bool {
        self.role == Role::Tutor
    }

    /// Orders the caller and a counterparty into a (tutor_id, student_id) pair.
    pub fn pair_with(&self, other_user_id: i32) -> (i32, i32) {
        match self.role {
            Role::Tutor => (self.user_id, other_user_id),
            Role::Student => (other_user_id, self.user_id),
        }
    }

    /// Resolves a (tutor_id, student_id) pair from an optionally supplied
    /// counterparty id, with the caller always filling their own side.
    pub fn resolve_pair(
        &self,
        tutor_id: Option<i32>,
        student_id: Option<i32>,
    ) -> AppResult<(i32, i32)> {
        match self.role {
            Role::Tutor => {
                let student_id = student_id
                    .ok_or_else(|| AppError::Validation("student_id is required".to_string()))?;
                Ok((self.user_id, student_id))
            }
            Role::Student => {
                let tutor_id = tutor_id
                    .ok_or_else(|| AppError::Validation("tutor_id is required".to_string()))?;
                Ok((tutor_id, self.user_id))
            }
        }
    }
}
