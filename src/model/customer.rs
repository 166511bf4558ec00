//! Customer records.

use serde::{Deserialize, Serialize};

use super::validation::{require_text, ValidationError};

const ENTITY: &str = "customer";

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Tax document (CPF/CNPJ) as typed by the user.
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Customer draft accepted on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)
    }

    pub fn into_customer(self, id: String) -> Customer {
        Customer {
            id,
            name: self.name,
            document: self.document,
            email: self.email,
            phone: self.phone,
            address: self.address,
            notes: self.notes,
        }
    }
}

/// Partial customer update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl CustomerUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text(ENTITY, "name", name)?;
        }
        Ok(())
    }

    pub fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(document) = &self.document {
            customer.document = document.clone();
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            customer.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            customer.address = address.clone();
        }
        if let Some(notes) = &self.notes {
            customer.notes = Some(notes.clone());
        }
    }
}
