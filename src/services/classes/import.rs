//! 学生名单导入
//!
//! 第一行为表头，之后每行前两列依次为姓名和邮箱，多余的列忽略。
//! 逐行写入，没有事务：中途失败时之前的行保持已提交。

use calamine::{Data, Reader, Xlsx};
use std::fmt;
use std::io::Cursor;

use crate::errors::OesError;
use crate::models::students::requests::CreateStudentRequest;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// 列数不足或姓名、邮箱为空
    MalformedRow,
    /// 邮箱已被使用
    Duplicate,
    /// 文件无法解码
    Unreadable,
    /// 其他存储错误
    Store,
}

/// 导入中止
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    /// 文件中的行号，表头为第 1 行
    pub row: usize,
    /// 中止前已写入的学生数
    pub imported: usize,
    pub kind: ImportErrorKind,
    pub detail: String,
}

impl ImportError {
    pub fn flash_message(&self) -> String {
        let reason = match self.kind {
            ImportErrorKind::MalformedRow => "expected a name and an email",
            ImportErrorKind::Duplicate => "a student with this email already exists",
            ImportErrorKind::Unreadable => "the file could not be read",
            ImportErrorKind::Store => "the student could not be saved",
        };
        format!(
            "Roster import stopped at row {}: {}. {} student(s) imported.",
            self.row, reason, self.imported
        )
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} at row {} after {} row(s): {}",
            self.kind, self.row, self.imported, self.detail
        )
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
}

/// 一行数据
#[derive(Debug, Clone, PartialEq)]
struct RosterRow {
    row: usize,
    cells: Vec<String>,
}

/// 解析结果，解码失败时保留失败之前的行
#[derive(Debug, Default)]
struct RosterFile {
    rows: Vec<RosterRow>,
    unreadable: Option<(usize, String)>,
}

impl RosterFile {
    fn unreadable(row: usize, detail: String) -> Self {
        Self {
            rows: Vec::new(),
            unreadable: Some((row, detail)),
        }
    }
}

fn is_xlsx(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".xlsx")
}

fn read_csv(data: &[u8]) -> RosterFile {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let mut roster = RosterFile::default();
    let mut record = csv::StringRecord::new();
    let mut header_seen = false;

    loop {
        match rdr.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let row = record.position().map(|p| p.line() as usize).unwrap_or(0);
                // 跳过表头
                if !header_seen {
                    header_seen = true;
                    continue;
                }
                roster.rows.push(RosterRow {
                    row,
                    cells: record.iter().map(str::to_string).collect(),
                });
            }
            Err(e) => {
                let fallback = roster.rows.last().map(|r| r.row + 1).unwrap_or(1);
                let row = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback);
                roster.unreadable = Some((row, format!("CSV 解析失败: {e}")));
                break;
            }
        }
    }

    roster
}

fn read_xlsx(data: &[u8]) -> RosterFile {
    let mut workbook: Xlsx<_> = match Xlsx::new(Cursor::new(data)) {
        Ok(workbook) => workbook,
        Err(e) => return RosterFile::unreadable(1, format!("打开 XLSX 失败: {e}")),
    };

    // 获取第一个工作表
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return RosterFile::unreadable(1, "工作簿中没有工作表".to_string());
    };

    let range = match workbook.worksheet_range(&sheet_name) {
        Ok(range) => range,
        Err(e) => return RosterFile::unreadable(1, format!("读取工作表失败: {e}")),
    };

    // 区域可能不从第一行开始
    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

    let rows = range
        .rows()
        .enumerate()
        .skip(1)
        .filter(|(_, cells)| !cells.iter().all(|c| matches!(c, Data::Empty)))
        .map(|(i, cells)| RosterRow {
            row: first_row + i + 1,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        })
        .collect();

    RosterFile {
        rows,
        unreadable: None,
    }
}

/// 将名单导入到指定班级
pub async fn import_roster(
    storage: &dyn Storage,
    class_id: i64,
    file_name: &str,
    data: &[u8],
) -> Result<ImportSummary, ImportError> {
    let roster = if is_xlsx(file_name) {
        read_xlsx(data)
    } else {
        read_csv(data)
    };

    let mut imported = 0;

    for RosterRow { row, cells } in roster.rows {
        let width = cells.len();
        let mut cells = cells.into_iter();
        let (name, email) = match (cells.next(), cells.next()) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => (name, email),
            _ => {
                return Err(ImportError {
                    row,
                    imported,
                    kind: ImportErrorKind::MalformedRow,
                    detail: format!("expected name and email, found {width} column(s)"),
                });
            }
        };

        match storage
            .create_student(CreateStudentRequest {
                name,
                email,
                class_id,
            })
            .await
        {
            Ok(_) => imported += 1,
            Err(OesError::UniqueViolation(msg)) => {
                return Err(ImportError {
                    row,
                    imported,
                    kind: ImportErrorKind::Duplicate,
                    detail: msg,
                });
            }
            Err(e) => {
                return Err(ImportError {
                    row,
                    imported,
                    kind: ImportErrorKind::Store,
                    detail: e.to_string(),
                });
            }
        }
    }

    if let Some((row, detail)) = roster.unreadable {
        return Err(ImportError {
            row,
            imported,
            kind: ImportErrorKind::Unreadable,
            detail,
        });
    }

    Ok(ImportSummary { imported })
}
