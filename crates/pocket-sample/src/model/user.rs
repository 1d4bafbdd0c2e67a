use pocket_framework::Dto;
use serde::{Deserialize, Serialize};

/// A user record as it travels over the wire.
///
/// Fields are private: the `id` is assigned by the backend and a change of
/// name produces a new value through [`SampleUserDto::renamed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleUserDto {
    id: String,
    name: String,
    created_date_time: i64,
    created_by_user_id: String,
    last_modified_date_time: Option<i64>,
    last_modified_by_user_id: Option<String>,
}

impl SampleUserDto {
    /// A user that has never been modified.
    ///
    /// Pass an empty `id` when submitting a new user; the backend assigns one.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        created_date_time: i64,
        created_by_user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_date_time,
            created_by_user_id: created_by_user_id.into(),
            last_modified_date_time: None,
            last_modified_by_user_id: None,
        }
    }

    /// Copy with a new name, stamped as modified at `at` by `by`.
    pub fn renamed(&self, name: impl Into<String>, at: i64, by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_modified_date_time: Some(at),
            last_modified_by_user_id: Some(by.into()),
            ..self.clone()
        }
    }
}

impl Dto for SampleUserDto {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_date_time(&self) -> i64 {
        self.created_date_time
    }

    fn created_by_user_id(&self) -> &str {
        &self.created_by_user_id
    }

    fn last_modified_date_time(&self) -> Option<i64> {
        self.last_modified_date_time
    }

    fn last_modified_by_user_id(&self) -> Option<&str> {
        self.last_modified_by_user_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_framework::check_shape;
    use serde_json::json;

    #[test]
    fn test_renamed_keeps_identity_and_stamps_modification() {
        let original = SampleUserDto::new("u1", "Ann", 1000, "sys");
        let edited = original.renamed("Annie", 2000, "u7");

        assert_eq!(original.name(), "Ann");
        assert_eq!(edited.id(), "u1");
        assert_eq!(edited.name(), "Annie");
        assert_eq!(edited.created_date_time(), 1000);
        assert_eq!(edited.last_modified_date_time(), Some(2000));
        assert_eq!(edited.last_modified_by_user_id(), Some("u7"));
        assert!(check_shape(&edited).is_ok());
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let dto: SampleUserDto = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ann",
            "createdDateTime": 1000,
            "createdByUserId": "sys",
            "lastModifiedDateTime": null,
            "lastModifiedByUserId": null
        }))
        .unwrap();

        assert_eq!(dto, SampleUserDto::new("u1", "Ann", 1000, "sys"));
        let value = serde_json::to_value(dto.renamed("Bo", 5, "u2")).unwrap();
        assert_eq!(value["lastModifiedByUserId"], "u2");
        assert_eq!(value["createdByUserId"], "sys");
    }
}
