//! 视图层
//!
//! 处理程序只产出模板名、上下文和提示消息，具体渲染由注入的 `ViewRenderer` 决定。

mod json;
mod response;

pub use json::JsonViewRenderer;
pub use response::{
    error_page, redirect, redirect_with_cookie, redirect_with_flash, render, render_with_status,
};

use serde::Serialize;

use crate::errors::Result;

/// 模板名称
pub mod templates {
    pub const INDEX: &str = "index";
    pub const TEACHER_LOGIN: &str = "teacher_login";
    pub const TEACHER_DASHBOARD: &str = "teacher_dashboard";
    pub const CREATE_CLASS: &str = "create_class";
    pub const UPLOAD_NOTES: &str = "upload_notes";
    pub const STUDENT_LOGIN: &str = "student_login";
    pub const STUDENT_DASHBOARD: &str = "student_dashboard";
    pub const ERROR: &str = "error";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: &'static str,
    pub flashes: Vec<String>,
    pub context: serde_json::Value,
}

impl View {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            flashes: Vec::new(),
            context: serde_json::Value::Object(Default::default()),
        }
    }

    /// 设置模板上下文
    pub fn with_context<T: Serialize>(mut self, context: &T) -> Result<Self> {
        self.context = serde_json::to_value(context)?;
        Ok(self)
    }

    /// 追加一条提示消息
    pub fn flash(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(message.into());
        self
    }
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub content_type: &'static str,
    pub body: String,
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<RenderedView>;
}
