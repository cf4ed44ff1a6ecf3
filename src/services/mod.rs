//! External collaborators of the wizard, expressed as traits with stock
//! implementations.

pub mod address;
pub mod preview;
pub mod submission;

pub use address::{
    AddressCandidate, AddressLookup, AddressSelection, AddressSuggester, Coordinates, Geocoder,
    LookupFailure, NoSuggestions, StaticCatalogue,
};
pub use preview::{attach_logo, FilePreviewRenderer, PreviewError, PreviewHandle, PreviewRenderer};
pub use submission::{DirectorySubmitter, LoggingSubmitter, SubmissionError, Submitter};
