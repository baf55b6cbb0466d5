use serde::Serialize;

use crate::models::assignments::entities::Assignment;

#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<Assignment>,
}
