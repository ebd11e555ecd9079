//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`requests`] - 入会申请（公开提交 + 管理员审批）
//! - [`members`] - 会员档案、分配、续费、出勤历史
//! - [`plans`] - 会籍计划管理接口
//! - [`users`] - 用户管理接口
//! - [`trainers`] - 教练侧接口（学员名单、签到、课程）
//! - [`dashboard`] - 汇总统计
//!
//! 认证/授权由上游协作方处理，不在本服务内。

pub mod dashboard;
pub mod health;
pub mod members;
pub mod plans;
pub mod requests;
pub mod trainers;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
