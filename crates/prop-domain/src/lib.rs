// prop-domain library entry point
pub mod error;
pub mod reservation;
pub mod services;
pub use error::{DomainError, ServiceError};
pub use reservation::{DateRange, DocumentRef, DocumentsSummary, ReservationOutcome, ReservationRequest};
pub use services::{AvailabilityReport, AvailabilityService, DocumentVerdict, DocumentVerifier, PriceQuote, PricingService,
                   PropertyDirectory, ScreeningReport, TenantDirectory, TenantScreening};
