//! Identity record supplied by the caller.

use serde::{Deserialize, Serialize};

use super::block::HEADER_SEPARATOR;

/// Name and contact details of the document owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    /// Full name
    pub name: String,

    /// Contact details
    pub contact: Contact,
}

impl Identity {
    /// Create an identity with a name and no contact details.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: Contact::default(),
        }
    }

    /// Set contact details.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    /// Parse an identity from JSON. Missing keys default to empty.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Up to four optional contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Phone number
    pub phone: Option<String>,

    /// Code-hosting profile URL
    pub github: Option<String>,

    /// Professional-network profile URL
    pub linkedin: Option<String>,

    /// Email address
    pub email: Option<String>,
}

impl Contact {
    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the code-hosting profile.
    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }

    /// Set the professional-network profile.
    pub fn with_linkedin(mut self, linkedin: impl Into<String>) -> Self {
        self.linkedin = Some(linkedin.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Non-empty fields in display order: phone, github, linkedin, email.
    pub fn fields(&self) -> Vec<&str> {
        [&self.phone, &self.github, &self.linkedin, &self.email]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect()
    }

    /// Check if no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Join the non-empty fields with ` | `.
    pub fn joined(&self) -> String {
        self.fields().join(HEADER_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_order_and_skips() {
        let contact = Contact::default()
            .with_email("jane@x.com")
            .with_phone("555-1000")
            .with_github("  ");
        assert_eq!(contact.joined(), "555-1000 | jane@x.com");
    }

    #[test]
    fn test_contact_empty() {
        assert!(Contact::default().is_empty());
        assert_eq!(Contact::default().joined(), "");
    }

    #[test]
    fn test_identity_from_json_partial() {
        let identity =
            Identity::from_json(r#"{"name": "Jane Doe", "contact": {"email": "jane@x.com"}}"#)
                .unwrap();
        assert_eq!(identity.name, "Jane Doe");
        assert_eq!(identity.contact.email.as_deref(), Some("jane@x.com"));
        assert!(identity.contact.phone.is_none());

        let empty = Identity::from_json("{}").unwrap();
        assert_eq!(empty, Identity::default());
    }
}
