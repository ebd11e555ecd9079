//! Gym Server - 健身房管理系统后端
//!
//! # 架构概述
//!
//! 本模块是 Gym Server 的主入口，提供以下核心功能：
//!
//! - **会籍生命周期引擎** (`membership`): 入会审批、教练/计划分配、
//!   续费日期推算、到期判定
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── membership/    # 会籍生命周期引擎
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod membership;
pub mod utils;

// Re-export 公共类型
pub use self::core::{Config, Server, ServerState};
pub use membership::{Clock, FixedClock, SystemClock};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/_  ______ ___
 / / __/ / / / __ `__ \
/ /_/ / /_/ / / / / / /
\____/\__, /_/ /_/ /_/
     /____/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
