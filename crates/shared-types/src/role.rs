use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Authorization role selecting which dashboard a user may see.
///
/// Closed set: adding a role is a compile-time change everywhere a role is
/// matched. Users without a `user_roles` row are treated as [`Role::Customer`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DeliveryPartner,
    #[default]
    Customer,
}

/// Every role in display order.
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::DeliveryPartner, Role::Customer];

impl Role {
    /// Parse a stored role tag. Unknown tags return `None`; they are never
    /// coerced into a known role.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "admin" => Some(Role::Admin),
            "delivery_partner" => Some(Role::DeliveryPartner),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }

    /// Tag as stored in `user_roles.role`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DeliveryPartner => "delivery_partner",
            Role::Customer => "customer",
        }
    }

    /// Dashboard heading for this role.
    pub fn dashboard_title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin Dashboard",
            Role::DeliveryPartner => "Delivery Partner Dashboard",
            Role::Customer => "My Dashboard",
        }
    }

    /// Whether this role may work the delivery queue (view customers'
    /// deliveries and record outcomes).
    pub fn can_manage_deliveries(&self) -> bool {
        matches!(self, Role::Admin | Role::DeliveryPartner)
    }

    /// Role for a user given their stored role tag, if any. A missing row
    /// means [`Role::Customer`]; an unknown tag is returned as the error.
    pub fn resolve(tag: Option<&str>) -> Result<Self, UnrecognizedRole> {
        match tag {
            None => Ok(Role::Customer),
            Some(tag) => Role::parse(tag).ok_or_else(|| UnrecognizedRole(tag.to_string())),
        }
    }
}

/// A stored role tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedRole(pub String);

impl fmt::Display for UnrecognizedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized role {:?}", self.0)
    }
}

impl std::error::Error for UnrecognizedRole {}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `user_roles` row. `role` stays free text so that values outside the
/// known set reach the client and can be reported instead of silently mapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct RoleRow {
    pub user_id: Uuid,
    pub role: String,
}
