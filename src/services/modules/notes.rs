//! 讲义聚合
//!
//! 一次提交最多三个槽位，每个槽位可带一段讲义文本和一个 PDF。
//! 按槽位 1..=3 依次处理，每一步立即提交；中途拒绝时之前的槽位保持已提交。

use std::fmt;
use tracing::{debug, warn};

use crate::blobs::BlobStore;
use crate::errors::OesError;
use crate::storage::Storage;
use crate::utils::{MultipartForm, UploadedFile};

pub const SLOT_COUNT: usize = 3;

pub const PDF_TOO_LARGE_MESSAGE: &str = "PDF file is too large.";

#[derive(Debug, Default)]
pub struct UploadSlot {
    pub notes: Option<UploadedFile>,
    pub pdf: Option<UploadedFile>,
}

#[derive(Debug, Default)]
pub struct ModuleUpload {
    pub slots: [UploadSlot; SLOT_COUNT],
}

impl ModuleUpload {
    /// 从表单中取出 `module{i}_notes` 和 `module{i}_pdf`
    pub fn from_form(form: &mut MultipartForm) -> Self {
        let mut upload = Self::default();
        for (i, slot) in upload.slots.iter_mut().enumerate() {
            let n = i + 1;
            slot.notes = form.take_file(&format!("module{n}_notes"));
            slot.pdf = form.take_file(&format!("module{n}_pdf"));
        }
        upload
    }
}

#[derive(Debug)]
pub enum NotesError {
    /// PDF 超过大小限制
    PdfTooLarge { slot: usize },
    /// 讲义不是 UTF-8 文本
    InvalidNotes { slot: usize },
    Store(OesError),
}

impl NotesError {
    pub fn flash_message(&self) -> Option<String> {
        match self {
            NotesError::PdfTooLarge { .. } => Some(PDF_TOO_LARGE_MESSAGE.to_string()),
            NotesError::InvalidNotes { slot } => {
                Some(format!("Notes for Module{slot} must be UTF-8 text."))
            }
            NotesError::Store(_) => None,
        }
    }
}

impl fmt::Display for NotesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotesError::PdfTooLarge { slot } => write!(f, "PDF in slot {slot} is too large"),
            NotesError::InvalidNotes { slot } => write!(f, "Notes in slot {slot} are not UTF-8"),
            NotesError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for NotesError {}

impl From<OesError> for NotesError {
    fn from(err: OesError) -> Self {
        NotesError::Store(err)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotesSummary {
    pub fragments: usize,
    pub pdfs: usize,
}

/// 单个槽位追加到讲义中的文本
pub fn format_fragment(slot: usize, text: &str) -> String {
    format!("Module{slot}:\n{text}\n\n")
}

pub async fn apply_upload(
    storage: &dyn Storage,
    blobs: &dyn BlobStore,
    module_id: i64,
    upload: ModuleUpload,
    max_pdf_size: usize,
) -> Result<NotesSummary, NotesError> {
    let mut summary = NotesSummary::default();

    for (i, slot) in upload.slots.into_iter().enumerate() {
        let n = i + 1;

        if let Some(notes) = slot.notes {
            let text =
                String::from_utf8(notes.content).map_err(|_| NotesError::InvalidNotes { slot: n })?;
            storage
                .append_module_notes(module_id, &format_fragment(n, &text))
                .await?;
            summary.fragments += 1;
        }

        if let Some(pdf) = slot.pdf {
            let size = pdf.reported_size();
            if size > max_pdf_size {
                warn!(
                    "Rejected PDF '{}' in slot {} for module {}: {} bytes",
                    pdf.file_name, n, module_id, size
                );
                return Err(NotesError::PdfTooLarge { slot: n });
            }

            let blob = blobs.save(&pdf.file_name, &pdf.content).await?;
            storage
                .set_module_pdf(module_id, &blob.original_name, &blob.key)
                .await?;
            debug!("Stored PDF '{}' as {}", blob.original_name, blob.key);
            summary.pdfs += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blobs::MemoryBlobStore;
    use crate::config::DatabaseConfig;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::modules::requests::CreateModuleRequest;
    use crate::models::users::entities::UserType;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::create_storage;
    use std::sync::Arc;

    const LIMIT: usize = 5 * 1024 * 1024;

    async fn storage_with_module() -> (Arc<dyn Storage>, i64) {
        let storage = create_storage(&DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .unwrap();
        let teacher = storage
            .create_user(CreateUserRequest {
                username: "t".to_string(),
                email: "t@example.com".to_string(),
                user_type: UserType::Teacher,
            })
            .await
            .unwrap();
        let class = storage
            .create_class(CreateClassRequest {
                name: "Chem".to_string(),
                subject: "Chemistry".to_string(),
                teacher_id: teacher.id,
            })
            .await
            .unwrap();
        let module = storage
            .create_module(CreateModuleRequest {
                name: "Week 1".to_string(),
                class_id: class.id,
            })
            .await
            .unwrap();
        (storage, module.id)
    }

    fn file(name: &str, content: &[u8]) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            declared_size: None,
            content: content.to_vec(),
        })
    }

    #[test]
    fn test_format_fragment() {
        assert_eq!(format_fragment(2, "hello"), "Module2:\nhello\n\n");
    }

    #[test]
    fn test_from_form_ignores_unselected_files() {
        let mut form = MultipartForm::default();
        form.files.insert(
            "module3_notes".to_string(),
            file("c.txt", b"three").unwrap(),
        );
        form.files
            .insert("module1_pdf".to_string(), UploadedFile::default());

        let upload = ModuleUpload::from_form(&mut form);
        assert!(upload.slots[0].pdf.is_none());
        assert!(upload.slots[2].notes.is_some());
    }

    #[actix_web::test]
    async fn test_single_slot_fragment() {
        let (storage, module_id) = storage_with_module().await;
        let blobs = MemoryBlobStore::new();
        let mut upload = ModuleUpload::default();
        upload.slots[1].notes = file("b.txt", b"hello");

        let summary = apply_upload(storage.as_ref(), &blobs, module_id, upload, LIMIT)
            .await
            .unwrap();
        assert_eq!(summary.fragments, 1);

        let module = storage.get_module_by_id(module_id).await.unwrap().unwrap();
        assert_eq!(module.notes, "Module2:\nhello\n\n");
    }

    #[actix_web::test]
    async fn test_slots_are_processed_in_order() {
        let (storage, module_id) = storage_with_module().await;
        let blobs = MemoryBlobStore::new();
        let mut upload = ModuleUpload::default();
        upload.slots[2].notes = file("c.txt", b"three");
        upload.slots[0].notes = file("a.txt", b"one");

        apply_upload(storage.as_ref(), &blobs, module_id, upload, LIMIT)
            .await
            .unwrap();

        let module = storage.get_module_by_id(module_id).await.unwrap().unwrap();
        assert_eq!(module.notes, "Module1:\none\n\nModule3:\nthree\n\n");
    }

    #[actix_web::test]
    async fn test_oversized_pdf_writes_nothing() {
        let (storage, module_id) = storage_with_module().await;
        let blobs = MemoryBlobStore::new();
        let mut upload = ModuleUpload::default();
        upload.slots[0].notes = file("a.txt", b"kept");
        upload.slots[0].pdf = Some(UploadedFile {
            file_name: "big.pdf".to_string(),
            declared_size: Some(LIMIT + 1),
            content: b"%PDF-1.4".to_vec(),
        });

        let err = apply_upload(storage.as_ref(), &blobs, module_id, upload, LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::PdfTooLarge { slot: 1 }));
        assert_eq!(err.flash_message().as_deref(), Some(PDF_TOO_LARGE_MESSAGE));
        assert!(blobs.is_empty());

        let module = storage.get_module_by_id(module_id).await.unwrap().unwrap();
        assert!(module.pdf_file.is_none());
        // 同一槽位的讲义已先提交
        assert_eq!(module.notes, "Module1:\nkept\n\n");
    }

    #[actix_web::test]
    async fn test_pdf_at_limit_is_stored_and_last_wins() {
        let (storage, module_id) = storage_with_module().await;
        let blobs = MemoryBlobStore::new();
        let mut upload = ModuleUpload::default();
        upload.slots[0].pdf = file("first.pdf", b"first");
        upload.slots[1].pdf = Some(UploadedFile {
            file_name: "second.pdf".to_string(),
            declared_size: Some(LIMIT),
            content: b"second".to_vec(),
        });

        let summary = apply_upload(storage.as_ref(), &blobs, module_id, upload, LIMIT)
            .await
            .unwrap();
        assert_eq!(summary.pdfs, 2);
        assert_eq!(blobs.len(), 2);

        let module = storage.get_module_by_id(module_id).await.unwrap().unwrap();
        assert_eq!(module.pdf_file.as_deref(), Some("second.pdf"));
        let key = module.pdf_blob_key.unwrap();
        assert_eq!(blobs.read(&key).await.unwrap(), b"second");
    }

    #[actix_web::test]
    async fn test_invalid_utf8_notes() {
        let (storage, module_id) = storage_with_module().await;
        let blobs = MemoryBlobStore::new();
        let mut upload = ModuleUpload::default();
        upload.slots[0].notes = file("a.txt", b"ok");
        upload.slots[1].notes = file("b.txt", b"\xff\xfe");

        let err = apply_upload(storage.as_ref(), &blobs, module_id, upload, LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::InvalidNotes { slot: 2 }));

        let module = storage.get_module_by_id(module_id).await.unwrap().unwrap();
        assert_eq!(module.notes, "Module1:\nok\n\n");
    }
}
