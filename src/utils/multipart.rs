//! multipart/form-data 读取
//!
//! 表单字段和文件全部读入内存后再交给业务逻辑，处理顺序与字段提交顺序无关。

use actix_multipart::Multipart;
use actix_web::http::header;
use futures_util::StreamExt;
use std::collections::HashMap;

use crate::errors::{OesError, Result};

/// 上传的文件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    /// 客户端在分段头中声明的大小
    pub declared_size: Option<usize>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    /// 文件名为空视为未选择文件
    pub fn is_present(&self) -> bool {
        !self.file_name.is_empty()
    }

    /// 传输层报告的大小，没有声明时按实际字节数
    pub fn reported_size(&self) -> usize {
        self.declared_size.unwrap_or(self.content.len())
    }
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 取出已选择的文件
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(UploadedFile::is_present)
    }
}

pub async fn read_multipart(payload: &mut Multipart) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| OesError::malformed_input(format!("读取字段失败: {e}")))?;

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());
        let declared_size = field
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<usize>().ok());

        // 读取内容
        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| OesError::malformed_input(format!("读取数据失败: {e}")))?;
            content.extend_from_slice(&data);
        }

        match file_name {
            Some(file_name) => {
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        declared_size,
                        content,
                    },
                );
            }
            None => {
                let value = String::from_utf8(content).map_err(|_| {
                    OesError::malformed_input(format!("Field '{name}' is not valid UTF-8"))
                })?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}
