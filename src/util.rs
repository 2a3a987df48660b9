/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

/// Helper macro for `TryFrom` out of a single enum variant; the value is handed back
/// unchanged when it is some other variant.
macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:path) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $from;
            fn try_from(f: $from) -> Result<$to, $from> {
                match f {
                    $ctor(t) => Ok(t),
                    other => Err(other),
                }
            }
        }
    };
}
