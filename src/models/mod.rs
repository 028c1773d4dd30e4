pub mod auth;
pub mod chat;
pub mod response;
pub mod workspace;

pub use auth::{AuthStatus, LoginRequest, LoginResponse, RegisterForm, RegisterRequest, Session, UserProfile};
pub use chat::{ChatReply, ChatRequest, Row};
pub use response::ApiResponse;
pub use workspace::{
    schema_tables, DatabaseSummary, DatabasesResponse, NameRequest, ProjectRequest, Relationship,
    RelationshipsResponse, Schema, SelectDatabaseRequest, SelectDatabaseResponse, TableSchema,
    UploadFile, UploadResponse,
};
