/*
 * Responsibility
 * - Roles の request/response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateRoleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl UpdateRoleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}
