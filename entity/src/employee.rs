use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: Option<String>,
    #[sea_orm(indexed)]
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations")
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Persisted employee record as served over HTTP.
pub type Employee = Model;

/// Body of a create request. Any client-supplied `id` is dropped; the store
/// assigns one on insert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl NewEmployee {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email: Some(email.to_string()),
        }
    }
}

impl IntoActiveModel<ActiveModel> for NewEmployee {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
        }
    }
}

/// Body of an update request.
///
/// Each field is merged independently: `None` (missing or `null`) keeps the
/// stored value, anything else replaces it. Empty strings are values, not
/// absences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// Merge the patch over `current`, marking only supplied fields as changed.
    pub fn apply(self, current: Model) -> ActiveModel {
        let mut active = current.into_active_model();
        if let Some(first_name) = self.first_name {
            active.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = self.last_name {
            active.last_name = Set(Some(last_name));
        }
        if let Some(email) = self.email {
            active.email = Set(Some(email));
        }
        active
    }
}
