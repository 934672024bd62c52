//! User creation and modification payloads.

use super::ResourceId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Role ids go over the wire as strings.
fn ids_as_strings<S: Serializer>(
    ids: &Option<Vec<ResourceId>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    ids.as_ref()
        .map(|ids| ids.iter().map(ToString::to_string).collect::<Vec<_>>())
        .serialize(serializer)
}

/// Crafty-level permission entry of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftyPermission {
    pub enabled: bool,
    /// `SERVER_CREATION`, `USER_CONFIG` or `ROLES_CONFIG`.
    pub name: String,
    pub quantity: i64,
}

impl CraftyPermission {
    pub fn new(name: impl Into<String>, enabled: bool, quantity: i64) -> Self {
        Self {
            enabled,
            name: name.into(),
            quantity,
        }
    }

    /// Validate a dynamic JSON permissions object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::type_mismatch("permissions", "dict", value))?;

        let (Some(enabled), Some(name), Some(quantity)) = (
            object.get("enabled"),
            object.get("name"),
            object.get("quantity"),
        ) else {
            return Err(Error::invalid_argument(
                "permissions dictionary must contain 'enabled', 'name', and 'quantity' keys",
            ));
        };

        Ok(Self {
            enabled: enabled
                .as_bool()
                .ok_or_else(|| Error::type_mismatch("permissions.enabled", "bool", enabled))?,
            name: name
                .as_str()
                .ok_or_else(|| Error::type_mismatch("permissions.name", "str", name))?
                .to_string(),
            quantity: quantity
                .as_i64()
                .ok_or_else(|| Error::type_mismatch("permissions.quantity", "int", quantity))?,
        })
    }
}

/// A user to create with `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub enabled: bool,
    pub hints: bool,
    pub lang: String,
    #[serde(
        serialize_with = "ids_as_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub roles: Option<Vec<ResourceId>>,
    pub superuser: bool,
}

impl NewUser {
    /// A user with the panel's defaults: enabled, hints on, `en_US`, no roles.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
            enabled: true,
            hints: true,
            lang: "en_US".to_string(),
            roles: None,
            superuser: false,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn roles<I, T>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResourceId>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn superuser(mut self, superuser: bool) -> Self {
        self.superuser = superuser;
        self
    }
}

/// A partial user update for `PATCH /users/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<bool>,
    #[serde(
        serialize_with = "ids_as_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub roles: Option<Vec<ResourceId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<CraftyPermission>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type-check each field of a dynamic JSON object.
    ///
    /// Null values count as absent. Unknown keys are rejected so that typos
    /// do not silently turn into no-op updates.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::type_mismatch("data", "dict", value))?;

        let mut patch = Self::new();
        for (key, value) in object.iter().filter(|(_, v)| !v.is_null()) {
            match key.as_str() {
                "username" => patch.username = Some(string_field(key, value)?),
                "password" => patch.password = Some(string_field(key, value)?),
                "email" => patch.email = Some(string_field(key, value)?),
                "lang" => patch.lang = Some(string_field(key, value)?),
                "enabled" => patch.enabled = Some(bool_field(key, value)?),
                "superuser" => patch.superuser = Some(bool_field(key, value)?),
                "hints" => patch.hints = Some(bool_field(key, value)?),
                "roles" => {
                    let roles = match value {
                        Value::Array(items) => items
                            .iter()
                            .map(|item| ResourceId::from_json("roles", item))
                            .collect::<Result<Vec<_>>>()?,
                        other => vec![ResourceId::from_json("roles", other)?],
                    };
                    patch.roles = Some(roles);
                }
                "permissions" => patch.permissions = Some(CraftyPermission::from_json(value)?),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "'{other}' is not a modifiable user field"
                    )));
                }
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn into_json(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn string_field(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::type_mismatch(key, "str", value))
}

fn bool_field(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::type_mismatch(key, "bool", value))
}

/// Role ids present on the panel, as strings, from a `GET /roles` payload.
pub(crate) fn role_ids(roles: &Value) -> Vec<String> {
    roles
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|role| role.get("role_id"))
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_user_defaults() {
        let body = serde_json::to_value(NewUser::new("steve", "hunter2")).unwrap();
        assert_eq!(
            body,
            json!({
                "username": "steve",
                "password": "hunter2",
                "enabled": true,
                "hints": true,
                "lang": "en_US",
                "superuser": false,
            })
        );
    }

    #[test]
    fn test_new_user_roles_serialize_as_strings() {
        let user = NewUser::new("alex", "pw").email("a@b.c").roles([1, 2]);
        let body = serde_json::to_value(user).unwrap();
        assert_eq!(body["roles"], json!(["1", "2"]));
        assert_eq!(body["email"], json!("a@b.c"));
    }

    #[test]
    fn test_patch_only_sends_set_fields() {
        let patch = UserPatch {
            enabled: Some(false),
            roles: Some(vec![ResourceId::from(3)]),
            ..UserPatch::default()
        };
        assert_eq!(
            patch.into_json().unwrap(),
            json!({"enabled": false, "roles": ["3"]})
        );
    }

    #[test]
    fn test_patch_from_json_type_checks_fields() {
        let err = UserPatch::from_json(&json!({"enabled": "yes"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected 'enabled' to be of type bool, but got str instead"
        );

        let err = UserPatch::from_json(&json!({"username": 12})).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        assert!(UserPatch::from_json(&json!({"nickname": "x"})).is_err());
    }

    #[test]
    fn test_patch_from_json_accepts_single_role() {
        let patch = UserPatch::from_json(&json!({"roles": 4, "lang": "de_DE"})).unwrap();
        assert_eq!(patch.roles, Some(vec![ResourceId::Int(4)]));
        assert_eq!(patch.lang.as_deref(), Some("de_DE"));
    }

    #[test]
    fn test_permission_requires_all_keys() {
        let err = CraftyPermission::from_json(&json!({"enabled": true, "name": "USER_CONFIG"}))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_permission_type_checks_keys() {
        let err = CraftyPermission::from_json(
            &json!({"enabled": true, "name": "USER_CONFIG", "quantity": "3"}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let ok = CraftyPermission::from_json(
            &json!({"enabled": true, "name": "USER_CONFIG", "quantity": 3}),
        )
        .unwrap();
        assert_eq!(ok, CraftyPermission::new("USER_CONFIG", true, 3));
    }

    #[test]
    fn test_role_ids_from_payload() {
        let roles = json!([{"role_id": 1, "role_name": "a"}, {"role_id": "2"}, {"name": "x"}]);
        assert_eq!(role_ids(&roles), vec!["1".to_string(), "2".to_string()]);
        assert!(role_ids(&json!(null)).is_empty());
    }
}
