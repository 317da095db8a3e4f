//! Position-synchronized child reconciliation.

use crate::element::Element;
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId};

/// Build the new child fiber chain for `wip` by walking its new child
/// elements and the previous generation's child chain (reached through
/// `alternate`) in lock-step, one position per iteration.
///
/// Fibers are compared by node type only. A match reuses the old host node
/// and links `alternate` (`Update`); a mismatch produces a fresh fiber with
/// no node (`Placement`) and, if an old fiber occupied the position, tags it
/// `Deletion` and appends it to `deletions`. Both cursors advance every
/// iteration, so the pass is O(max(old, new)) with no lookahead.
///
/// This is a positional diff: reordered children with preserved identity
/// reconcile as delete-plus-placement pairs, not as moves.
pub(crate) fn reconcile_children<N: Clone>(
    arena: &mut FiberArena<N>,
    deletions: &mut Vec<FiberId>,
    wip: FiberId,
    elements: Vec<Element>,
) {
    let mut old_fiber = arena[wip].alternate.and_then(|alt| arena[alt].child);
    let mut prev_sibling: Option<FiberId> = None;
    let mut elements = elements.into_iter();

    loop {
        let element = elements.next();
        if element.is_none() && old_fiber.is_none() {
            break;
        }

        let same_type = match (&element, old_fiber) {
            (Some(el), Some(old)) => arena[old].node_type.as_ref() == Some(el.node_type()),
            _ => false,
        };

        if let Some(old) = old_fiber {
            if !same_type {
                arena[old].effect = Some(EffectTag::Deletion);
                deletions.push(old);
            }
        }

        let new_fiber = element.map(|el| {
            let (node_type, props, children) = el.into_parts();
            let reused = if same_type { old_fiber } else { None };
            arena.insert(Fiber {
                node_type: Some(node_type),
                props,
                children,
                node: reused.and_then(|old| arena[old].node.clone()),
                parent: Some(wip),
                child: None,
                sibling: None,
                alternate: reused,
                effect: Some(if same_type {
                    EffectTag::Update
                } else {
                    EffectTag::Placement
                }),
            })
        });

        // Advance the old cursor whichever branch was taken.
        if let Some(old) = old_fiber {
            old_fiber = arena[old].sibling;
        }

        if let Some(id) = new_fiber {
            match prev_sibling {
                None => arena[wip].child = Some(id),
                Some(prev) => arena[prev].sibling = Some(id),
            }
            prev_sibling = Some(id);
        }
    }
}
