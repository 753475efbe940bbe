//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Invariants that must hold regardless of entry point (no overlapping
//! windows, one invoice per owner/period, all-or-nothing generation) are
//! enforced here.

pub mod extra_charge;
pub mod health;
pub mod horse;
pub mod invoice;
pub mod location;
pub mod owner;
pub mod ownership;
pub mod placement;
pub mod rate_type;
pub mod service_provider;
pub mod settings;

pub use extra_charge::{CreateExtraChargeInput, ExtraChargeError, ExtraChargeRepository};
pub use health::{
    CreateFarrierVisitInput, CreateVaccinationInput, FarrierReminder, HealthError,
    HealthRepository, VaccinationReminder,
};
pub use horse::{CreateHorseInput, HorseError, HorseRepository, UpdateHorseInput};
pub use invoice::{
    GenerateInvoiceInput, InvoiceRepoError, InvoiceRepository, InvoiceWithLines, OverdueInvoice,
};
pub use location::{CreateLocationInput, LocationError, LocationRepository};
pub use owner::{CreateOwnerInput, OwnerError, OwnerRepository, UpdateOwnerInput};
pub use ownership::{OwnershipError, OwnershipRepository, RecordOwnershipInput};
pub use placement::{CreatePlacementInput, PlacementRepoError, PlacementRepository};
pub use rate_type::{CreateRateTypeInput, RateTypeError, RateTypeRepository};
pub use service_provider::{
    CreateServiceProviderInput, ServiceProviderError, ServiceProviderRepository,
};
pub use settings::{SettingsError, SettingsRepository, UpdateSettingsInput};
