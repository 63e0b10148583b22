use std::io;

use thiserror::Error;

use crate::RestaurantId;

/// Failure to load the restaurant catalog. Loading is all-or-nothing, so any
/// of these leaves the caller with no catalog at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog manifest {path} could not be read")]
    ManifestMissing {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("catalog manifest {path} is malformed")]
    ManifestMalformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("restaurant file {file} could not be read")]
    RestaurantMissing {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("restaurant file {file} is malformed")]
    RestaurantMalformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("restaurant id '{id}' is defined more than once")]
    DuplicateId { id: RestaurantId },
}

/// A restaurant id that no longer resolves against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("restaurant '{id}' is not in the catalog")]
pub struct StaleReference {
    pub id: RestaurantId,
}
