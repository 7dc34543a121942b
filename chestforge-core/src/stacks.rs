use crate::block::ItemKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STACK_CAPACITY: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub quantity: u32,
    pub max_capacity: u32,
}

impl ItemStack {
    pub fn new(kind: ItemKind, quantity: u32, max_capacity: u32) -> Self {
        Self {
            kind,
            quantity,
            max_capacity: max_capacity.max(1),
        }
    }

    pub fn spare_capacity(&self) -> u32 {
        self.max_capacity.saturating_sub(self.quantity)
    }
}

/// Merges stacks of the same kind up to their capacity.
///
/// Each input first tops up earlier entries of its kind; whatever is left
/// becomes new entries, split at capacity. Total quantity per kind is kept and
/// empty stacks are dropped.
pub fn consolidate(stacks: &[ItemStack]) -> Vec<ItemStack> {
    let mut merged: Vec<ItemStack> = Vec::new();

    for stack in stacks {
        let mut remaining = stack.quantity;

        for existing in merged.iter_mut().filter(|entry| entry.kind == stack.kind) {
            if remaining == 0 {
                break;
            }
            let transfer = remaining.min(existing.spare_capacity());
            existing.quantity += transfer;
            remaining -= transfer;
        }

        let capacity = stack.max_capacity.max(1);
        while remaining > 0 {
            let quantity = remaining.min(capacity);
            merged.push(ItemStack {
                quantity,
                max_capacity: capacity,
                ..*stack
            });
            remaining -= quantity;
        }
    }

    tracing::debug!(
        input = stacks.len(),
        output = merged.len(),
        "consolidated item stacks"
    );
    merged
}

pub fn has_kind(stacks: &[ItemStack], kind: ItemKind) -> bool {
    stacks.iter().any(|stack| stack.kind == kind)
}

/// Takes a single unit from the first stack of `kind`, dropping it if it empties.
pub fn remove_one_unit(stacks: &[ItemStack], kind: ItemKind) -> Vec<ItemStack> {
    let mut remaining = stacks.to_vec();
    if let Some(index) = remaining.iter().position(|stack| stack.kind == kind) {
        let stack = &mut remaining[index];
        stack.quantity = stack.quantity.saturating_sub(1);
        if stack.quantity == 0 {
            remaining.remove(index);
        }
    }
    remaining
}
