//! Song title matching: normalization, the title index and the resolver.

pub mod distance;
pub mod index;
pub mod normalize;
pub mod resolver;

pub use index::{IndexedTitle, TitleIndex};
pub use normalize::{collapse_whitespace, normalize, strip_to_alnum, tokenize, NormalizedText};
pub use resolver::{Resolution, Resolver};
