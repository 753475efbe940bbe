//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sex of a horse.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "horse_sex")]
#[serde(rename_all = "lowercase")]
pub enum HorseSex {
    /// Adult female.
    #[sea_orm(string_value = "mare")]
    Mare,
    /// Castrated male.
    #[sea_orm(string_value = "gelding")]
    Gelding,
    /// Intact adult male.
    #[sea_orm(string_value = "stallion")]
    Stallion,
    /// Young male.
    #[sea_orm(string_value = "colt")]
    Colt,
    /// Young female.
    #[sea_orm(string_value = "filly")]
    Filly,
}

/// Charging basis of a rate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rate_basis")]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Charged per chargeable day.
    #[sea_orm(string_value = "per_day")]
    PerDay,
    /// Flat amount per billing period.
    #[sea_orm(string_value = "per_month")]
    PerMonth,
}

/// Category of a service provider.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "provider_type")]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Veterinarian.
    #[sea_orm(string_value = "vet")]
    Vet,
    /// Farrier.
    #[sea_orm(string_value = "farrier")]
    Farrier,
    /// Equine dentist.
    #[sea_orm(string_value = "dentist")]
    Dentist,
    /// Physiotherapist.
    #[sea_orm(string_value = "physio")]
    Physio,
    /// Saddler.
    #[sea_orm(string_value = "saddler")]
    Saddler,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Category of an extra charge.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "charge_type")]
#[serde(rename_all = "lowercase")]
pub enum ChargeType {
    /// Veterinary work.
    #[sea_orm(string_value = "vet")]
    Vet,
    /// Farrier work.
    #[sea_orm(string_value = "farrier")]
    Farrier,
    /// Vaccination.
    #[sea_orm(string_value = "vaccination")]
    Vaccination,
    /// Feed or hay.
    #[sea_orm(string_value = "feed")]
    Feed,
    /// Medication.
    #[sea_orm(string_value = "medication")]
    Medication,
    /// Transport.
    #[sea_orm(string_value = "transport")]
    Transport,
    /// Equipment.
    #[sea_orm(string_value = "equipment")]
    Equipment,
    /// Dentist work.
    #[sea_orm(string_value = "dentist")]
    Dentist,
    /// Physiotherapy.
    #[sea_orm(string_value = "physio")]
    Physio,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Being prepared.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Issued; contents frozen.
    #[sea_orm(string_value = "sent")]
    Sent,
    /// Payment recorded.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due without payment.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

impl From<InvoiceStatus> for paddock_core::billing::InvoiceStatus {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Draft => Self::Draft,
            InvoiceStatus::Sent => Self::Sent,
            InvoiceStatus::Paid => Self::Paid,
            InvoiceStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<paddock_core::billing::InvoiceStatus> for InvoiceStatus {
    fn from(status: paddock_core::billing::InvoiceStatus) -> Self {
        use paddock_core::billing::InvoiceStatus as Core;
        match status {
            Core::Draft => Self::Draft,
            Core::Sent => Self::Sent,
            Core::Paid => Self::Paid,
            Core::Overdue => Self::Overdue,
        }
    }
}

/// Classification of an invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "line_type")]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Livery charge from a placement.
    #[sea_orm(string_value = "livery")]
    Livery,
    /// Veterinary extra.
    #[sea_orm(string_value = "vet")]
    Vet,
    /// Farrier extra.
    #[sea_orm(string_value = "farrier")]
    Farrier,
    /// Vaccination extra.
    #[sea_orm(string_value = "vaccination")]
    Vaccination,
    /// Feed extra.
    #[sea_orm(string_value = "feed")]
    Feed,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<paddock_core::billing::LineType> for LineType {
    fn from(line_type: paddock_core::billing::LineType) -> Self {
        use paddock_core::billing::LineType as Core;
        match line_type {
            Core::Livery => Self::Livery,
            Core::Vet => Self::Vet,
            Core::Farrier => Self::Farrier,
            Core::Vaccination => Self::Vaccination,
            Core::Feed => Self::Feed,
            Core::Other => Self::Other,
        }
    }
}

impl From<LineType> for paddock_core::billing::LineType {
    fn from(line_type: LineType) -> Self {
        match line_type {
            LineType::Livery => Self::Livery,
            LineType::Vet => Self::Vet,
            LineType::Farrier => Self::Farrier,
            LineType::Vaccination => Self::Vaccination,
            LineType::Feed => Self::Feed,
            LineType::Other => Self::Other,
        }
    }
}

impl From<ChargeType> for paddock_core::billing::LineType {
    fn from(charge_type: ChargeType) -> Self {
        match charge_type {
            ChargeType::Vet => Self::Vet,
            ChargeType::Farrier => Self::Farrier,
            ChargeType::Vaccination => Self::Vaccination,
            ChargeType::Feed => Self::Feed,
            ChargeType::Medication
            | ChargeType::Transport
            | ChargeType::Equipment
            | ChargeType::Dentist
            | ChargeType::Physio
            | ChargeType::Other => Self::Other,
        }
    }
}

/// Work performed during a farrier visit.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "farrier_work")]
#[serde(rename_all = "snake_case")]
pub enum FarrierWork {
    /// Trim only.
    #[sea_orm(string_value = "trim")]
    Trim,
    /// Front shoes.
    #[sea_orm(string_value = "front_shoes")]
    FrontShoes,
    /// Full set of shoes.
    #[sea_orm(string_value = "full_set")]
    FullSet,
    /// Remedial work.
    #[sea_orm(string_value = "remedial")]
    Remedial,
    /// Shoe removal.
    #[sea_orm(string_value = "remove")]
    Remove,
}
