//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// Reference id.
pub type RefId = u64;

/// Annotation id.
pub type AnnId = u64;

/// Image id.
pub type ImageId = u64;

/// Sentence id.
pub type SentId = u64;

/// Category id.
pub type CategoryId = u64;

/// A COCO-style ``[x, y, width, height]`` bounding box.
///
/// Coordinates keep their JSON number representation, so integer pixel
/// boxes are written back as integers.
pub type BBox = [serde_json::Number; 4];

/// Build a [`BBox`] from integer coordinates.
pub fn bbox<N: Into<serde_json::Number>>(xywh: [N; 4]) -> BBox {
    xywh.map(Into::into)
}

/// A type that can be used as a word index in the label matrices.
///
/// These are constrained to be unsigned primitive integers;
/// index `0` is reserved as the padding / end marker.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;

    #[test]
    fn test_common_token_types() {
        struct IsToken<T: TokenType>(PhantomData<T>);

        let _: IsToken<u16>;
        let _: IsToken<u32>;
        let _: IsToken<u64>;
        let _: IsToken<usize>;
    }
}
