//! Address Cascade
//!
//! Province, district and ward are chosen in order; each level is only
//! selectable once its parent is. The cascade is a tagged state so a ward
//! without a district, or a district without a province, cannot be built.

use smallvec::SmallVec;
use thiserror::Error;

use crate::models::{DistrictCode, ProvinceCode, WardCode};

mod draft;

pub use draft::{AddressDraft, AddressDraftError, MissingField};

/// Errors raised when a level is chosen before its parent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CascadeError {
    /// A district was chosen with no province selected.
    #[error("select a province before choosing a district")]
    NoProvince,

    /// A ward was chosen with no district selected.
    #[error("select a district before choosing a ward")]
    NoDistrict,
}

/// Option lists owned by the cascade's child levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionList {
    /// Districts of the selected province.
    Districts,

    /// Wards of the selected district.
    Wards,
}

/// Child option list to fetch after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildFetch {
    /// Fetch the districts of this province.
    Districts(ProvinceCode),

    /// Fetch the wards of this district.
    Wards(DistrictCode),
}

/// What a selection changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeStep {
    /// Option lists that no longer apply and must be emptied.
    pub cleared: SmallVec<[OptionList; 2]>,

    /// Option list to fetch next, if any.
    pub fetch: Option<ChildFetch>,
}

impl CascadeStep {
    /// Whether the selection changed nothing.
    pub fn is_unchanged(&self) -> bool {
        self.cleared.is_empty() && self.fetch.is_none()
    }
}

/// Province, district and ward chosen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressCascade {
    /// Nothing chosen.
    #[default]
    Empty,

    /// Province chosen.
    Province(ProvinceCode),

    /// Province and district chosen.
    District(ProvinceCode, DistrictCode),

    /// Every level chosen.
    Ward(ProvinceCode, DistrictCode, WardCode),
}

impl AddressCascade {
    /// Chosen province.
    pub fn province(&self) -> Option<ProvinceCode> {
        match *self {
            Self::Empty => None,
            Self::Province(province)
            | Self::District(province, _)
            | Self::Ward(province, _, _) => Some(province),
        }
    }

    /// Chosen district.
    pub fn district(&self) -> Option<DistrictCode> {
        match *self {
            Self::Empty | Self::Province(_) => None,
            Self::District(_, district) | Self::Ward(_, district, _) => Some(district),
        }
    }

    /// Chosen ward.
    pub fn ward(&self) -> Option<WardCode> {
        match *self {
            Self::Ward(_, _, ward) => Some(ward),
            _ => None,
        }
    }

    /// Whether every level is chosen.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Ward(..))
    }

    /// Choose a province, dropping any district and ward.
    ///
    /// Choosing the current province again changes nothing.
    pub fn set_province(&mut self, province: ProvinceCode) -> CascadeStep {
        if self.province() == Some(province) {
            return CascadeStep::default();
        }

        *self = Self::Province(province);

        CascadeStep {
            cleared: SmallVec::from_buf([OptionList::Districts, OptionList::Wards]),
            fetch: Some(ChildFetch::Districts(province)),
        }
    }

    /// Choose a district of the current province, dropping any ward.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NoProvince`] if no province is chosen.
    pub fn set_district(&mut self, district: DistrictCode) -> Result<CascadeStep, CascadeError> {
        let province = self.province().ok_or(CascadeError::NoProvince)?;

        if self.district() == Some(district) {
            return Ok(CascadeStep::default());
        }

        *self = Self::District(province, district);

        let mut cleared = SmallVec::new();
        cleared.push(OptionList::Wards);

        Ok(CascadeStep {
            cleared,
            fetch: Some(ChildFetch::Wards(district)),
        })
    }

    /// Choose a ward of the current district.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::NoDistrict`] if no district is chosen.
    pub fn set_ward(&mut self, ward: WardCode) -> Result<CascadeStep, CascadeError> {
        let (Self::District(province, district) | Self::Ward(province, district, _)) = *self
        else {
            return Err(CascadeError::NoDistrict);
        };

        *self = Self::Ward(province, district, ward);

        Ok(CascadeStep::default())
    }

    /// Forget every choice.
    pub fn reset(&mut self) {
        *self = Self::Empty;
    }
}
