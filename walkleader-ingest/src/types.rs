use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use walkleader_core::{ContactDetails, ResolvedWalk};

/// Leader details as stored on a walk record by the events system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkContactDetails {
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkFields {
    #[serde(default)]
    pub contact_details: Option<WalkContactDetails>,
}

/// A walk/event record. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub fields: WalkFields,
}

impl WalkRecord {
    /// The leader details as the matcher's input type.
    pub fn contact_details(&self) -> ContactDetails {
        let Some(cd) = self.fields.contact_details.as_ref() else {
            return ContactDetails::default();
        };
        ContactDetails {
            contact_id: cd.contact_id.clone(),
            member_id: cd.member_id.clone(),
            display_name: cd.display_name.clone(),
            email: cd.email.clone(),
            phone: cd.phone.clone(),
        }
    }

    /// Already carries a non-blank member id.
    pub fn is_attributed(&self) -> bool {
        self.member_id().is_some_and(|id| !id.trim().is_empty())
    }

    /// Id for display, falling back to the title.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("(unnamed walk)")
    }
}

impl ResolvedWalk for WalkRecord {
    fn contact_id(&self) -> Option<&str> {
        self.fields.contact_details.as_ref()?.contact_id.as_deref()
    }

    fn member_id(&self) -> Option<&str> {
        self.fields.contact_details.as_ref()?.member_id.as_deref()
    }
}
