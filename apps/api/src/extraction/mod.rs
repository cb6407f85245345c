// PDF text extraction: uploaded bytes → bounded plain text.
// pdf-extract is CPU-bound, so decoding runs inside tokio::task::spawn_blocking.

pub mod extractor;
pub mod handlers;
