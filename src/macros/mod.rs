//! Internal macros.

/// Implement `From<$ty> for Key` by converting through `sea_query::Value`.
macro_rules! impl_key_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::proxy::Key {
                fn from(value: $ty) -> Self {
                    $crate::proxy::Key::Value(sea_query::Value::from(value))
                }
            }
        )*
    };
}
