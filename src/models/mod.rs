pub mod file;
pub mod pattern;
pub mod session;
pub mod share;

pub use file::{FileKey, RootFile, SensitiveFile};
pub use pattern::SensitivePattern;
pub use session::{ScanSession, ScanStatus};
pub use share::{AccessLevel, Share, ShareKey};
