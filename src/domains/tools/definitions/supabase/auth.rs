//! Supabase Auth admin tools.

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::domains::rules::identifier::path_segment;
use crate::domains::tools::definitions::common::{array_field, clamp_limit, require_text, text_field};
use crate::domains::tools::{ToolHandler, ToolResult};

use super::common::SupabaseApi;

const USERS_PATH: &str = "/auth/v1/admin/users";
const MAX_USERS_PER_PAGE: u32 = 1000;

/// Public view of an auth user.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct UserSummary {
    pub id: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&Value> for UserSummary {
    fn from(user: &Value) -> Self {
        Self {
            id: text_field(user, "id"),
            email: text_field(user, "email"),
            created_at: text_field(user, "created_at"),
            last_sign_in_at: text_field(user, "last_sign_in_at"),
            role: text_field(user, "role"),
        }
    }
}

// ============================================================================
// list_users
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListUsersParams {
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,

    #[schemars(description = "Users per page (default: 50)")]
    #[serde(default = "default_users_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_users_per_page() -> u32 {
    50
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListUsersResult {
    pub count: usize,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone)]
pub struct ListUsersTool {
    api: SupabaseApi,
}

impl ListUsersTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListUsersTool {
    const NAME: &'static str = "list_users";
    const DESCRIPTION: &'static str = "List Supabase Auth users: id, email, creation and last sign-in dates, role.";

    type Params = ListUsersParams;
    type Output = ListUsersResult;

    async fn call(&self, params: ListUsersParams) -> ToolResult<ListUsersResult> {
        let page = params.page.max(1);
        let per_page = clamp_limit(params.per_page, 1, MAX_USERS_PER_PAGE);

        let request = self
            .api
            .request(Method::GET, USERS_PATH)
            .query(&[("page", page), ("per_page", per_page)]);
        let data = self.api.send(request).await?;

        let users: Vec<UserSummary> = array_field(&data, "users").iter().map(Into::into).collect();
        Ok(ListUsersResult {
            count: users.len(),
            users,
        })
    }
}

// ============================================================================
// create_user
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateUserParams {
    #[schemars(description = "User email address")]
    pub email: String,

    #[schemars(description = "User password")]
    pub password: String,

    #[schemars(description = "Confirm the email immediately (default: true)")]
    #[serde(default = "default_email_confirm")]
    pub email_confirm: bool,
}

fn default_email_confirm() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CreateUserResult {
    pub user: UserSummary,
}

#[derive(Debug, Clone)]
pub struct CreateUserTool {
    api: SupabaseApi,
}

impl CreateUserTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateUserTool {
    const NAME: &'static str = "create_user";
    const DESCRIPTION: &'static str = "Create a Supabase Auth user.";

    type Params = CreateUserParams;
    type Output = CreateUserResult;

    async fn call(&self, params: CreateUserParams) -> ToolResult<CreateUserResult> {
        let email = require_text("email", &params.email)?;
        require_text("password", &params.password)?;
        info!("Creating user {}", email);

        let request = self.api.request(Method::POST, USERS_PATH).json(json!({
            "email": email,
            "password": params.password,
            "email_confirm": params.email_confirm,
        }));
        let user = self.api.send(request).await?;

        let mut user = UserSummary::from(&user);
        user.last_sign_in_at = None;
        user.role = None;
        Ok(CreateUserResult { user })
    }
}

// ============================================================================
// delete_user
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteUserParams {
    #[schemars(description = "User UUID")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DeleteUserResult {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DeleteUserTool {
    api: SupabaseApi,
}

impl DeleteUserTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for DeleteUserTool {
    const NAME: &'static str = "delete_user";
    const DESCRIPTION: &'static str = "Delete a Supabase Auth user by UUID.";

    type Params = DeleteUserParams;
    type Output = DeleteUserResult;

    async fn call(&self, params: DeleteUserParams) -> ToolResult<DeleteUserResult> {
        let user_id = path_segment(params.user_id.trim())?;
        info!("Deleting user {}", user_id);

        let request = self
            .api
            .request(Method::DELETE, &format!("{}/{}", USERS_PATH, user_id));
        self.api.send(request).await?;

        Ok(DeleteUserResult {
            message: format!("User {} deleted", user_id),
        })
    }
}
