// 创建课程模块请求
#[derive(Debug, Clone)]
pub struct CreateModuleRequest {
    pub name: String,
    pub class_id: i64,
}
