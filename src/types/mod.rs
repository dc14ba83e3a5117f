//! Typed representations of Amara API resources

pub use subtitles::{Subtitles, SubtitlesAuthor, SubtitlesLanguage};
pub use video::{Video, VideoLanguage, VideoMetadata};

mod subtitles;
mod video;
