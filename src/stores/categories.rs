// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{CollectionStore, Editable, Resource};
use crate::api::Method;
use crate::models::{Category, NewCategory};
use crate::notify::{ErrorField, Messages};

pub struct Categories;

impl Resource for Categories {
    type Item = Category;
    type Input = NewCategory;
    type Created = Category;

    const LIST_PATH: &'static str = "/categories/";
    const PATH: &'static str = "/categories/";
    const LOAD_FAILED: &'static str = "Could not load the categories.";
    const CREATE: Messages = Messages::new(
        "Creating category...",
        "Category created.",
        "Could not create the category.",
    )
    .with_server_field(ErrorField::FirstOf("name"));
    const DELETE: Messages = Messages::new(
        "Deleting category...",
        "Category deleted.",
        "Could not delete the category. Try again.",
    );
}

impl Editable for Categories {
    const UPDATE_METHOD: Method = Method::Patch;
    const UPDATE: Messages = Messages::new(
        "Updating category...",
        "Category updated.",
        "Could not update the category. Check whether it already exists.",
    );
}

pub type CategoryStore = CollectionStore<Categories>;

impl CollectionStore<Categories> {
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.items()
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(name))
    }
}
