mod codec;
pub mod config;
mod frame;
mod integrity;
mod layout;
pub mod obfuscate;
mod pixel;
pub mod pipeline;

pub use codec::{embed, extract, ExtractError};
pub use layout::{plan, Layout, PlanError};
pub use pixel::{PixelBuffer, PixelError};
pub use pipeline::embed::{embed_payload, embed_text};
pub use pipeline::extract::{extract_payload, extract_text};
pub use pipeline::hook::{NoopHook, TransitHook};
pub use pipeline::{roundtrip, RoundtripResult};
