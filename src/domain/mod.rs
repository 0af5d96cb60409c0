//! Submission validation and the record shapes shared by storage,
//! notification and the HTTP surface.
//!
//! Every parser here is pure: no network, no storage, no clock reads. The
//! current date and the airport catalogue are handed in by the caller.

mod attachment;
mod field_error;
mod person_name;
mod phone_number;
mod quantity;
mod records;
mod route;
mod status;
mod submission;
mod submitter_email;

pub use attachment::{
    Attachment, AttachmentKind, AttachmentRejection, AttachmentUpload, MAX_ATTACHMENT_BYTES,
};
pub use field_error::{FieldError, FieldErrors};
pub use person_name::PersonName;
pub use phone_number::{PhoneNumber, MIN_PHONE_DIGITS};
pub use quantity::{Quantity, MIN_POINTS};
pub use records::{Booking, Lead, Submission, SubmissionKind};
pub use route::{AirportCatalog, Route};
pub use status::{Status, StatusParseError};
pub use submission::{BookingPayload, LeadPayload, NewBooking, NewLead};
pub use submitter_email::SubmitterEmail;
