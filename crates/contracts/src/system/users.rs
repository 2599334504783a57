use super::roles::{Role, RoleId};
use super::timezones::is_known_timezone;
use crate::shared::limits::{character_max_message, EMAIL, FIRST_NAME, LAST_NAME};
use crate::shared::validation::{required_message, FieldErrors};
use serde::{Deserialize, Serialize};

/// Platform user as returned by `GET /api/users/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub profile_timezone: Option<String>,
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub roles: Vec<RoleId>,
    pub profile_timezone: String,
}

/// Create/edit user form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub roles: Vec<RoleId>,
    pub profile_timezone: String,
}

impl ManageUserForm {
    /// Initial values: the edited user, else the role the dialog was opened
    /// from; the timezone falls back to the signed-in user's.
    pub fn initial(
        existing: Option<&PlatformUser>,
        preselected_role: Option<RoleId>,
        default_timezone: Option<&str>,
    ) -> Self {
        let fallback_timezone = default_timezone.unwrap_or_default().to_string();
        match existing {
            Some(user) => Self {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone().unwrap_or_default(),
                email: user.email.clone(),
                mobile: user.mobile.clone().unwrap_or_default(),
                roles: user.roles.iter().map(|r| r.id).collect(),
                profile_timezone: user
                    .profile_timezone
                    .clone()
                    .filter(|tz| !tz.is_empty())
                    .unwrap_or(fallback_timezone),
            },
            None => Self {
                roles: preselected_role.into_iter().collect(),
                profile_timezone: fallback_timezone,
                ..Self::default()
            },
        }
    }

    pub fn toggle_role(&mut self, role: RoleId) {
        if let Some(pos) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(pos);
        } else {
            self.roles.push(role);
        }
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }

    pub fn validate(&self) -> Result<UserPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.add("first_name", required_message("first name"));
        } else if first_name.chars().count() > FIRST_NAME {
            errors.add("first_name", character_max_message("First Name", FIRST_NAME));
        } else if !is_valid_name(first_name) {
            errors.add("first_name", "Please enter a valid first name");
        }

        let last_name = self.last_name.trim();
        if last_name.chars().count() > LAST_NAME {
            errors.add("last_name", character_max_message("Last Name", LAST_NAME));
        } else if !last_name.is_empty() && !is_valid_name(last_name) {
            errors.add("last_name", "Please enter a valid last name");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", required_message("email"));
        } else if email.chars().count() > EMAIL {
            errors.add("email", character_max_message("Email", EMAIL));
        } else if !is_valid_email(email) {
            errors.add("email", "Please enter a valid email");
        }

        let mobile = normalize_mobile(&self.mobile);
        if self.mobile.trim().is_empty() {
            errors.add("mobile", required_message("phone number"));
        } else if !is_valid_mobile(&mobile) {
            errors.add("mobile", "Please enter a valid phone number");
        }

        if self.roles.is_empty() {
            errors.add("roles", "Please select at least one role");
        }

        let profile_timezone = self.profile_timezone.trim();
        if profile_timezone.is_empty() {
            errors.add("profile_timezone", "Please select profile timezone");
        } else if !is_known_timezone(profile_timezone) {
            errors.add("profile_timezone", "Please select a valid profile timezone");
        }

        errors.into_result(UserPayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            mobile,
            roles: self.roles.clone(),
            profile_timezone: profile_timezone.to_string(),
        })
    }
}

/// Letters, spaces, apostrophes, dots and hyphens, starting with a letter
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '.' | '-'))
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
        && labels.last().is_some_and(|tld| tld.chars().count() >= 2)
}

/// Strip formatting and make sure the number carries a leading `+`
pub fn normalize_mobile(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        String::new()
    } else {
        format!("+{}", digits)
    }
}

/// Номер в международном формате, действительный по метаданным libphonenumber
pub fn is_valid_mobile(normalized: &str) -> bool {
    if !normalized.starts_with('+') {
        return false;
    }
    phonenumber::parse(None, normalized)
        .map(|number| phonenumber::is_valid(&number))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::roles::Department;

    fn valid_form() -> ManageUserForm {
        ManageUserForm {
            first_name: "Ada".into(),
            last_name: "O'Neil-Smith".into(),
            email: "ada@fleet.example.com".into(),
            mobile: "1 (201) 555-0123".into(),
            roles: vec![2],
            profile_timezone: "America/Chicago".into(),
        }
    }

    #[test]
    fn test_valid_form_normalizes_mobile() {
        let payload = valid_form().validate().unwrap();
        assert_eq!(payload.mobile, "+12015550123");
        assert_eq!(payload.last_name, "O'Neil-Smith");
    }

    #[test]
    fn test_required_fields() {
        let errors = ManageUserForm::default().validate().unwrap_err();
        for field in ["first_name", "email", "mobile", "roles", "profile_timezone"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("last_name"));
    }

    #[test]
    fn test_format_rules() {
        let mut form = valid_form();
        form.first_name = "4da".into();
        form.last_name = "Sm1th".into();
        form.email = "ada@localhost".into();
        form.mobile = "+0123".into();
        form.profile_timezone = "Central Time".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("first_name"), Some("Please enter a valid first name"));
        assert_eq!(errors.get("last_name"), Some("Please enter a valid last name"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        assert_eq!(errors.get("mobile"), Some("Please enter a valid phone number"));
        assert_eq!(
            errors.get("profile_timezone"),
            Some("Please select a valid profile timezone")
        );
    }

    #[test]
    fn test_mobile_must_be_a_real_number() {
        assert!(is_valid_mobile("+12015550123"));
        assert!(is_valid_mobile("+447400123456"));
        // plausible length, impossible numbering plan
        assert!(!is_valid_mobile("+12345678"));
        assert!(!is_valid_mobile("+10005550123"));
        assert!(!is_valid_mobile("12015550123"));

        let mut form = valid_form();
        form.mobile = "+1 000 555 0123".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("mobile"), Some("Please enter a valid phone number"));
    }

    #[test]
    fn test_length_limits() {
        let mut form = valid_form();
        form.first_name = "A".repeat(FIRST_NAME + 1);
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("first_name"),
            Some("First Name must be at most 50 characters")
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@@example.com"));
        assert!(!is_valid_email("a@example.c"));
        assert!(!is_valid_email("a@-example.com"));
    }

    #[test]
    fn test_initial_values() {
        let form = ManageUserForm::initial(None, Some(7), Some("Europe/Berlin"));
        assert_eq!(form.roles, vec![7]);
        assert_eq!(form.profile_timezone, "Europe/Berlin");

        let user = PlatformUser {
            id: "u-1".into(),
            first_name: "Lin".into(),
            last_name: None,
            email: "lin@example.com".into(),
            mobile: Some("+4915112345678".into()),
            roles: vec![Role {
                id: 3,
                name: "dispatcher".into(),
                department: Some(Department {
                    short_name: Some("ops".into()),
                }),
            }],
            profile_timezone: None,
        };
        let form = ManageUserForm::initial(Some(&user), Some(7), Some("Europe/Berlin"));
        assert_eq!(form.roles, vec![3]);
        assert_eq!(form.last_name, "");
        assert_eq!(form.profile_timezone, "Europe/Berlin");
    }

    #[test]
    fn test_toggle_role() {
        let mut form = ManageUserForm::default();
        form.toggle_role(4);
        form.toggle_role(5);
        assert!(form.has_role(4));
        form.toggle_role(4);
        assert_eq!(form.roles, vec![5]);
    }
}
