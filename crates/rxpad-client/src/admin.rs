//! `/api/admin` endpoints: user management and per-doctor prescription history.

use reqwest::Method;
use rxpad_core::models::{Page, PageRequest, Pagination, Prescription, User, UserStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiClient, ApiResult};

/// Which accounts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    Doctor,
    Admin,
}

impl RoleFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleFilter::Doctor => "Doctor",
            RoleFilter::Admin => "Admin",
        }
    }
}

/// Query for the admin user listing. Unset fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub page: PageRequest,
    pub search: String,
    pub role: Option<RoleFilter>,
    pub status: Option<UserStatus>,
}

impl UserQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.page.to_string()),
            ("limit", self.page.limit.to_string()),
        ];
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.trim().to_string()));
        }
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

/// Partial update of an account; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

// Older backends return a bare array with no paging metadata.
#[derive(Deserialize)]
#[serde(untagged)]
enum UsersResponse {
    Paged {
        users: Vec<User>,
        pagination: Pagination,
    },
    Bare(Vec<User>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        match response {
            UserResponse::Wrapped { user } | UserResponse::Bare(user) => user,
        }
    }
}

#[derive(Deserialize)]
struct DoctorPrescriptions {
    prescriptions: Vec<Prescription>,
    pagination: Pagination,
}

impl ApiClient {
    pub fn list_users(&self, query: &UserQuery) -> ApiResult<Page<User>> {
        let pairs = query.query_pairs();
        let response: UsersResponse =
            self.call_json(Method::GET, &["admin", "users"], |req| req.query(&pairs))?;
        Ok(match response {
            UsersResponse::Paged { users, pagination } => Page {
                items: users,
                pagination,
            },
            UsersResponse::Bare(users) => Page::unpaged(users),
        })
    }

    pub fn get_user(&self, id: &str) -> ApiResult<User> {
        let response: UserResponse =
            self.call_json(Method::GET, &["admin", "users", id], |req| req)?;
        Ok(response.into())
    }

    pub fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<User> {
        let response: UserResponse =
            self.call_json(Method::PUT, &["admin", "users", id], |req| req.json(update))?;
        info!(id, "user updated");
        Ok(response.into())
    }

    /// Activate or deactivate an account.
    pub fn set_user_status(&self, id: &str, status: UserStatus) -> ApiResult<User> {
        self.update_user(
            id,
            &UserUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.call(Method::DELETE, &["admin", "users", id], |req| req)?;
        info!(id, "user deleted");
        Ok(())
    }

    /// One page of a doctor's prescriptions, newest first.
    pub fn doctor_prescriptions(
        &self,
        doctor_id: &str,
        page: PageRequest,
    ) -> ApiResult<Page<Prescription>> {
        let pairs = [("page", page.page), ("limit", page.limit)];
        let response: DoctorPrescriptions = self.call_json(
            Method::GET,
            &["admin", "doctors", doctor_id, "prescriptions"],
            |req| req.query(&pairs),
        )?;
        Ok(Page {
            items: response.prescriptions,
            pagination: response.pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_query_pairs() {
        let query = UserQuery {
            page: PageRequest::new(2, 10),
            search: " meera ".into(),
            role: Some(RoleFilter::Doctor),
            status: Some(UserStatus::Inactive),
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("search", "meera".to_string()),
                ("role", "Doctor".to_string()),
                ("status", "Inactive".to_string()),
            ]
        );
        assert_eq!(UserQuery::default().query_pairs().len(), 2);
    }

    #[test]
    fn test_status_update_body() {
        let update = UserUpdate {
            status: Some(UserStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "Inactive"})
        );
    }

    #[test]
    fn test_users_response_shapes() {
        let bare: UsersResponse =
            serde_json::from_str(r#"[{"_id": "a1", "email": "a@x.com", "role": "Admin"}]"#).unwrap();
        assert!(matches!(bare, UsersResponse::Bare(ref users) if users.len() == 1));

        let paged: UsersResponse = serde_json::from_str(
            r#"{"users": [], "pagination": {"currentPage": 3, "totalPages": 4, "totalUsers": 31}}"#,
        )
        .unwrap();
        match paged {
            UsersResponse::Paged { pagination, .. } => assert_eq!(pagination.total_items, 31),
            UsersResponse::Bare(_) => panic!("expected paged response"),
        }
    }
}
