//! Address form state.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{
    address::AddressCascade,
    models::{AddressKind, UserAddressRequest},
};

/// A required address field left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// Receiver name.
    ReceiverName,
    /// Phone number.
    PhoneNumber,
    /// Street address.
    FullAddress,
    /// Province.
    Province,
    /// District.
    District,
    /// Ward.
    Ward,
}

impl Display for MissingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::ReceiverName => "receiver name",
            Self::PhoneNumber => "phone number",
            Self::FullAddress => "street address",
            Self::Province => "province",
            Self::District => "district",
            Self::Ward => "ward",
        })
    }
}

/// Errors raised when turning a draft into a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressDraftError {
    /// One or more required fields are empty.
    #[error("address is incomplete, missing: {}", join(.0))]
    Incomplete(Vec<MissingField>),
}

fn join(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Delivery address being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    /// Id of the saved address being edited, if any.
    pub id: Option<String>,

    /// Receiver name.
    pub receiver_name: String,

    /// Receiver phone number.
    pub phone_number: String,

    /// Street address.
    pub full_address: String,

    /// Address kind.
    pub address_type: AddressKind,

    /// Province, district and ward.
    pub cascade: AddressCascade,
}

impl AddressDraft {
    /// Fields that must be filled before the draft can be submitted.
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();

        if self.receiver_name.trim().is_empty() {
            missing.push(MissingField::ReceiverName);
        }

        if self.phone_number.trim().is_empty() {
            missing.push(MissingField::PhoneNumber);
        }

        if self.full_address.trim().is_empty() {
            missing.push(MissingField::FullAddress);
        }

        if self.cascade.province().is_none() {
            missing.push(MissingField::Province);
        }

        if self.cascade.district().is_none() {
            missing.push(MissingField::District);
        }

        if self.cascade.ward().is_none() {
            missing.push(MissingField::Ward);
        }

        missing
    }

    /// Build the update request, trimming the free-text fields.
    ///
    /// # Errors
    ///
    /// Returns [`AddressDraftError::Incomplete`] listing every empty field.
    pub fn into_request(self) -> Result<UserAddressRequest, AddressDraftError> {
        let AddressCascade::Ward(province_code, district_code, ward_code) = self.cascade else {
            return Err(AddressDraftError::Incomplete(self.missing_fields()));
        };

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AddressDraftError::Incomplete(missing));
        }

        Ok(UserAddressRequest {
            id: self.id,
            receiver_name: self.receiver_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            full_address: self.full_address.trim().to_string(),
            province_code,
            district_code,
            ward_code,
            address_type: self.address_type,
        })
    }
}
