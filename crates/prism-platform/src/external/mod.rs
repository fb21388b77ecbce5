//! External programs prism drives, behind async traits so they can be
//! bounded by `tokio::time::timeout` and swapped out in tests.

mod extractor;
mod reload;

pub use extractor::{ColorExtractor, ImageMagickExtractor};
pub use reload::{notify_all, CommandNotifier, ReloadNotifier};
