//! Data transfer objects for the Web API.

mod request;
mod response;
mod validation;

pub use request::{
    ChangePasswordRequest, CreateTaskRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    UpdateTaskRequest,
};
pub use response::{LoginResponse, RegisterResponse, SuccessResponse, TaskResponse, UserInfo};
pub use validation::{no_control_chars, ValidatedJson};
