use super::{RenderedView, View, ViewRenderer};
use crate::errors::Result;

/// 以 JSON 形式输出视图模型，HTML 模板层在前端实现
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: &View) -> Result<RenderedView> {
        Ok(RenderedView {
            content_type: "application/json; charset=utf-8",
            body: serde_json::to_string(view)?,
        })
    }
}
