use crate::blobs::{BlobStore, create_blob_store};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserType;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{Storage, create_storage};
use crate::views::{JsonViewRenderer, ViewRenderer};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub blobs: Arc<dyn BlobStore>,
    pub renderer: Arc<dyn ViewRenderer>,
}

/// 生成随机会话密钥
pub fn generate_random_secret(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 会话密钥为空时生成随机密钥，重启后已签发的会话全部失效
pub fn ensure_session_secret(config: &mut AppConfig) {
    if config.session.secret.is_empty() {
        warn!("==========================================================");
        warn!("  SESSION SECRET NOT SET - USING A RANDOM SECRET");
        warn!("  Sessions will not survive a restart");
        warn!("  Set SESSION_SECRET to keep users logged in");
        warn!("==========================================================");
        config.session.secret = generate_random_secret(64);
    }
}

/// 写入配置中的教师账号，已存在的用户名跳过
pub async fn seed_teachers(storage: &Arc<dyn Storage>, config: &AppConfig) {
    for teacher in &config.seed.teachers {
        match storage.get_user_by_username(&teacher.username).await {
            Ok(Some(_)) => {
                debug!("Teacher '{}' already exists, skipping seed", teacher.username);
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to look up teacher '{}': {}", teacher.username, e);
                continue;
            }
        }

        let request = CreateUserRequest {
            username: teacher.username.clone(),
            email: teacher.email.clone(),
            user_type: UserType::Teacher,
        };

        match storage.create_user(request).await {
            Ok(user) => {
                info!(
                    "Teacher account created (ID: {}, username: {})",
                    user.id, user.username
                );
            }
            Err(e) => {
                warn!("Failed to create teacher '{}': {}", teacher.username, e);
            }
        }
    }

    match storage.count_users().await {
        Ok(0) => warn!("No teacher accounts exist, configure [[seed.teachers]] to log in"),
        Ok(count) => debug!("Database has {} user(s)", count),
        Err(e) => warn!("Failed to count users: {}", e),
    }
}

/// 构建存储、Blob 存储和渲染器并写入种子数据
pub async fn build_context(config: &AppConfig) -> Result<StartupContext> {
    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let blobs = create_blob_store(&config.upload)?;
    warn!("Blob store '{}' initialized", config.upload.backend);

    seed_teachers(&storage, config).await;

    Ok(StartupContext {
        storage,
        blobs,
        renderer: Arc::new(JsonViewRenderer),
    })
}

/// 准备服务器启动的上下文
/// 包括存储、Blob 存储和视图渲染器
pub async fn prepare_server_startup(config: &AppConfig) -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    match build_context(config).await {
        Ok(context) => context,
        Err(e) => {
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            error!("Failed to prepare server startup: {}", e);
            std::process::exit(1);
        }
    }
}
