/*!
 * Long-sentence splitting.
 *
 * This module contains the machinery for splitting overly long sentences via
 * an external text splitter and recovering millisecond timing for the pieces:
 *
 * - `batch`: concurrent batched dispatch with per-batch failure isolation
 * - `align`: mapping returned text segments back onto original timed tokens
 * - `timing`: converting spans to fragment timing, and proportional time
 *   redistribution for text without token-level timestamps
 * - `rules`: rule-based pre-split for translated CJK text
 */

// Re-export main types for easier usage
pub use self::align::{align_segments, normalize, Span};
pub use self::batch::BatchSplitter;
pub use self::timing::{redistribute_interval, spans_to_fragments};

// Submodules
pub mod align;
pub mod batch;
pub mod rules;
pub mod timing;
