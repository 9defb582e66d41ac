#![forbid(unsafe_code)]

pub mod blend;
pub mod canvas;
pub mod compose;
pub mod docgen;
pub mod encode;
pub mod error;
pub mod font;
pub mod pipeline;
pub mod request;
pub mod seed;
pub mod style;

pub use canvas::Canvas;
pub use docgen::{DocFormat, DocPayload, handle_doc_request};
pub use error::{PromptpixError, PromptpixResult};
pub use font::FontStack;
pub use pipeline::{generate, generate_data_uri, handle_image_request};
pub use request::{GenerationRequest, GenerationResponse};
pub use seed::derive_seed;
