//! OES - 课堂讲义管理服务
//!
//! 基于 Actix Web 构建：教师创建班级、导入学生名单、上传讲义和 PDF，
//! 学生按班级名称、姓名和邮箱登录查看本班的课程模块。
//!
//! # 架构
//! - `blobs`: 上传文件存储（本地目录/内存）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话校验中间件
//! - `models`: 数据模型定义
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 会话、提示消息、表单读取等工具
//! - `views`: 视图模型与渲染

pub mod blobs;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;
