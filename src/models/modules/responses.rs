use serde::Serialize;

use crate::models::modules::entities::Module;

#[derive(Debug, Serialize)]
pub struct ModuleListResponse {
    pub modules: Vec<Module>,
}
