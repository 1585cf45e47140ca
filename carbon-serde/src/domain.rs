pub mod response {

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct PutResponse {
        pub stored: bool,
    }

    impl PutResponse {
        pub fn new(stored: bool) -> Self {
            Self { stored }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct DeleteResponse {
        pub deleted: bool,
    }

    impl DeleteResponse {
        pub fn new(deleted: bool) -> Self {
            Self { deleted }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ClearResponse {
        pub cleared: bool,
    }

    impl ClearResponse {
        pub fn new(cleared: bool) -> Self {
            Self { cleared }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ExistsResponse {
        pub exists: bool,
    }

    impl ExistsResponse {
        pub fn new(exists: bool) -> Self {
            Self { exists }
        }
    }
}

/// Result of a bulk read: every requested key, in request order, with its
/// value or the caller's default.
pub type Entries<K, V> = Vec<(K, Option<V>)>;
