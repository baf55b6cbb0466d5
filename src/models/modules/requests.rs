use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub title: String,
}

// 重排请求：课程内全部模块 ID 的新顺序
#[derive(Debug, Deserialize)]
pub struct ReorderModulesRequest {
    pub module_ids_in_order: Vec<i64>,
}
