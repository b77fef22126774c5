use serde::Deserialize;

use sentinel_auth::{CreateUserRequest, LoginRequest};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LogInBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    pub username: String,
    pub password: String,
    pub role_request: RoleRequestBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequestBody {
    #[serde(default)]
    pub role_list_name: Vec<String>,
}

impl From<LogInBody> for LoginRequest {
    fn from(body: LogInBody) -> Self {
        LoginRequest {
            username: body.username,
            password: body.password,
        }
    }
}

impl From<SignUpBody> for CreateUserRequest {
    fn from(body: SignUpBody) -> Self {
        CreateUserRequest {
            username: body.username,
            password: body.password,
            roles: body.role_request.role_list_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_body_uses_nested_role_request() {
        let body: SignUpBody = serde_json::from_str(
            r#"{"username":"Ana","password":"pw","roleRequest":{"roleListName":["USER","INVITED"]}}"#,
        )
        .unwrap();

        let request = CreateUserRequest::from(body);
        assert_eq!(request.username, "Ana");
        assert_eq!(request.roles, vec!["USER".to_string(), "INVITED".to_string()]);
    }
}
