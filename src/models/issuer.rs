// src/models/issuer.rs
//! Issuer record data model.
//!
//! Represents a credential issuer registered with the service. An issuer is
//! identified by its DID (decentralized identifier), used here purely as an
//! opaque unique authority key. All remaining fields are denormalized
//! display metadata, overwritten on every registration message for the DID.

use serde::{Deserialize, Serialize};

/// A registered credential issuer.
///
/// # Fields
/// - `id`: store-assigned record identifier
/// - `did`: globally unique authority identifier, immutable once registered
/// - remaining fields: display metadata refreshed on re-registration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Issuer {
    /// Store-assigned record identifier
    pub id: u64,

    /// Decentralized identifier of the issuer
    /// Example: "did:sov:HR6vs6GEZ8rHaVgjg2WodM"
    pub did: String,

    /// Human-readable issuer name
    /// Example: "Ministry of Finance"
    pub name: String,

    /// Short display abbreviation
    pub abbreviation: Option<String>,

    /// Contact email address
    pub email: Option<String>,

    /// Informational website URL
    pub url: Option<String>,

    /// Agent endpoint used for message delivery
    pub endpoint: Option<String>,

    /// Issuer logo as base64-encoded text
    pub logo_b64: Option<String>,
}

impl Issuer {
    /// Creates an issuer record with the given identity and no metadata.
    ///
    /// Used by stores when a DID is seen for the first time; the caller is
    /// expected to fill in the metadata fields and persist the update.
    pub fn new(id: u64, did: String) -> Self {
        Issuer {
            id,
            did,
            name: String::new(),
            abbreviation: None,
            email: None,
            url: None,
            endpoint: None,
            logo_b64: None,
        }
    }
}
