//! `SeaORM` entity definitions for the yard schema.

pub mod business_settings;
pub mod extra_charges;
pub mod farrier_visits;
pub mod horses;
pub mod invoice_line_items;
pub mod invoices;
pub mod locations;
pub mod ownerships;
pub mod owners;
pub mod placements;
pub mod rate_types;
pub mod sea_orm_active_enums;
pub mod service_providers;
pub mod vaccination_types;
pub mod vaccinations;
