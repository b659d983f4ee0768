//! 核心错误处理模块

use axum::{
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 查找失败（按 id 查找不到，或搜索结果为空）
    #[error("{0}")]
    NotFound(String),
    /// 请求体或查询参数无法解析，保留提取器给出的状态码
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

/// 错误响应结构，与成功响应共用 `success` 字段
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = ErrorResponse {
            success: false,
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for CoreError {
                fn from(rejection: $rejection) -> Self {
                    CoreError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, FormRejection, QueryRejection);
