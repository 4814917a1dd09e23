pub mod radical_code;
pub mod record;
pub mod title;

pub use radical_code::RadicalCode;
pub use record::{CanonicalRecord, RemoteRow};
pub use title::{ParsedTitle, VideoRef};
