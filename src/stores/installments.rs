// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{CollectionStore, Resource};
use crate::models::{InstallmentExpense, InstallmentInput};
use crate::notify::Messages;

/// Installment plans. The server expands each plan into monthly rows; plans
/// are created and deleted but never edited.
pub struct Installments;

impl Resource for Installments {
    type Item = InstallmentExpense;
    type Input = InstallmentInput;
    type Created = InstallmentExpense;

    const LIST_PATH: &'static str = "/installments/";
    const PATH: &'static str = "/installments/";
    const LOAD_FAILED: &'static str = "Could not load the installment expenses.";
    const CREATE: Messages = Messages::new(
        "Saving installment expense...",
        "Installment expense created.",
        "Could not add the installment expense, try again.",
    );
    const DELETE: Messages = Messages::new(
        "Deleting installment expense...",
        "Installment expense deleted.",
        "Could not delete the installment expense.",
    );
}

pub type InstallmentStore = CollectionStore<Installments>;
