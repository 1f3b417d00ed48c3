pub mod page_range;
pub mod password;
pub mod pdf;
pub mod ready;
pub mod speech;
pub mod text;
pub mod wav;

pub use page_range::PageRangeParser;
pub use pdf::PdfTools;
pub use ready::ReadyGate;
pub use speech::SpeechClient;
pub use text::TextTools;
pub use wav::WavEncoder;
