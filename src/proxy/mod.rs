//! The attribute-style query proxy.
//!
//! - **Maker**: [`QueryMaker`], the proxy itself
//! - **Attr**: what an attribute name resolves to ([`Attr`], [`ColumnProxy`])
//! - **Native**: query methods reachable by name ([`NativeMethod`], [`NativeCall`])
//! - **Key**: arguments of indexing ([`Key`])
//! - **Wrapper**: the native query surface, re-wrapping results ([`QueryWrapper`])

pub mod maker;
#[doc(inline)]
pub use maker::{QueryMaker, Selection};

pub mod attr;
#[doc(inline)]
pub use attr::{Attr, ColumnProxy};

pub mod native;
#[doc(inline)]
pub use native::{NativeCall, NativeMethod};

pub mod key;
#[doc(inline)]
pub use key::Key;

pub mod wrapper;
#[doc(inline)]
pub use wrapper::{ColumnDescription, QueryWrapper};
