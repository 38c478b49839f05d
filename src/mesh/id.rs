/// Declares an `i32`-backed entity identifier.
///
/// Ids are allocated by [`MeshData`](super::MeshData) from a per-entity
/// monotonic counter and are never reused within a mesh instance.
macro_rules! entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $name(pub i32);

        impl $name {
            /// Returns the raw integer id.
            #[must_use]
            pub fn raw(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a point in a mesh.
    pub struct PointId;
}

entity_id! {
    /// Unique identifier for a line in a mesh.
    pub struct LineId;
}

entity_id! {
    /// Unique identifier for a triangle in a mesh.
    pub struct TriangleId;
}
