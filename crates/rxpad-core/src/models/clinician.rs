//! Clinician profiles and user accounts.

use serde::{Deserialize, Serialize};

/// Display and contact details used to fill the document header and footer.
///
/// Every field is optional; the renderer substitutes defaults for whatever is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicianProfile {
    pub name: Option<String>,
    pub qualification: Option<String>,
    pub registration_no: Option<String>,
    pub clinic_hospital_name: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub specialty: Option<String>,
    /// Logo image reference (URL or path)
    pub logo_pic: Option<String>,
}

/// Account status managed by administrators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    /// The status an activate/deactivate toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

/// Fields every doctor account carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub clinic_hospital_name: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub registration_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_pic: Option<String>,
}

/// Fields of an administrator account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Account role with the fields that role requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role")]
pub enum Role {
    Doctor(DoctorFields),
    Admin(AdminFields),
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor(_) => "Doctor",
            Role::Admin(_) => "Admin",
        }
    }
}

/// A user account as returned by the auth and admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub role: Role,
}

impl User {
    /// Name shown in listings; doctors get the "Dr." prefix.
    pub fn display_name(&self) -> String {
        match &self.role {
            Role::Doctor(doctor) if !doctor.name.is_empty() => format!("Dr. {}", doctor.name),
            Role::Doctor(_) => self.email.clone(),
            Role::Admin(admin) => admin.name.clone().unwrap_or_else(|| self.email.clone()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin(_))
    }

    /// Renderer profile for doctor accounts; `None` for administrators.
    pub fn clinician_profile(&self) -> Option<ClinicianProfile> {
        let Role::Doctor(doctor) = &self.role else {
            return None;
        };
        Some(ClinicianProfile {
            name: non_empty(&doctor.name),
            qualification: non_empty(&doctor.qualification),
            registration_no: non_empty(&doctor.registration_no),
            clinic_hospital_name: non_empty(&doctor.clinic_hospital_name),
            address: non_empty(&doctor.address),
            mobile: self.mobile.as_deref().and_then(non_empty),
            specialty: doctor.specialty.as_deref().and_then(non_empty),
            logo_pic: doctor.logo_pic.as_deref().and_then(non_empty),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
