// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{CollectionStore, Editable, Resource};
use crate::api::Method;
use crate::models::{Asset, NewAsset};
use crate::notify::{ErrorField, Messages};

pub struct Assets;

impl Resource for Assets {
    type Item = Asset;
    type Input = NewAsset;
    type Created = Asset;

    const LIST_PATH: &'static str = "/assets/";
    const PATH: &'static str = "/assets/";
    const LOAD_FAILED: &'static str = "Could not load the asset list.";
    const CREATE: Messages = Messages::new(
        "Registering new asset...",
        "Asset registered.",
        "Could not register the asset. Check whether it already exists.",
    )
    .with_server_field(ErrorField::FirstOf("code"));
    const DELETE: Messages = Messages::new(
        "Deleting asset...",
        "Asset deleted.",
        "Could not delete the asset.",
    );
}

impl Editable for Assets {
    const UPDATE_METHOD: Method = Method::Patch;
    const UPDATE: Messages = Messages::new(
        "Saving changes...",
        "Asset updated.",
        "Could not save the changes. Check for duplicated information.",
    );
}

pub type AssetStore = CollectionStore<Assets>;

impl CollectionStore<Assets> {
    /// Codes are unique per user, compared case-insensitively.
    pub fn find_by_code(&self, code: &str) -> Option<&Asset> {
        let code = code.trim();
        self.items()
            .iter()
            .find(|asset| asset.code.eq_ignore_ascii_case(code))
    }
}
