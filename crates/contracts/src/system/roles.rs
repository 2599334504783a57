use serde::{Deserialize, Serialize};

pub type RoleId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub department: Option<Department>,
}

impl Role {
    /// `DISPATCHER (OPS)`, or just `DISPATCHER` without a department
    pub fn label(&self) -> String {
        let short_name = self
            .department
            .as_ref()
            .and_then(|d| d.short_name.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        match short_name {
            Some(short) => format!("{} ({})", self.name.to_uppercase(), short.to_uppercase()),
            None => self.name.to_uppercase(),
        }
    }
}

/// Text of the closed role select: selected labels joined by commas
pub fn selected_roles_label(roles: &[Role], selected: &[RoleId]) -> String {
    if selected.is_empty() {
        return "Select Role".to_string();
    }
    roles
        .iter()
        .filter(|role| selected.contains(&role.id))
        .map(Role::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: RoleId, name: &str, short: Option<&str>) -> Role {
        Role {
            id,
            name: name.to_string(),
            department: short.map(|s| Department {
                short_name: Some(s.to_string()),
            }),
        }
    }

    #[test]
    fn test_role_label() {
        assert_eq!(role(1, "dispatcher", Some("ops")).label(), "DISPATCHER (OPS)");
        assert_eq!(role(2, "admin", None).label(), "ADMIN");
        assert_eq!(role(3, "driver", Some(" ")).label(), "DRIVER");
    }

    #[test]
    fn test_selected_roles_label_keeps_catalog_order() {
        let roles = vec![role(1, "admin", None), role(2, "dispatcher", Some("ops"))];
        assert_eq!(selected_roles_label(&roles, &[]), "Select Role");
        assert_eq!(
            selected_roles_label(&roles, &[2, 1]),
            "ADMIN, DISPATCHER (OPS)"
        );
    }
}
