//! Constructor/destructor propagation and object-subclass pruning.

use crate::class::MemberRecord;
use crate::registry::{MAIN_MODULE, Registry};

/// What one resolution pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Members copied onto discovered classes.
    pub propagated: usize,
    /// Rounds until no class changed, the final quiet round included.
    pub rounds: usize,
    /// Discovered classes dropped for not deriving from `QObject`.
    pub pruned: Vec<String>,
}

/// Propagates inherited members, then prunes non-object classes.
pub fn resolve(registry: &mut Registry) -> ResolveReport {
    let (propagated, rounds) = propagate_inherited(registry);
    let pruned = prune_non_objects(registry);

    tracing::event!(
        tracing::Level::INFO,
        "Resolved inheritance: {} members propagated in {} rounds, {} classes pruned",
        propagated,
        rounds,
        pruned.len()
    );

    ResolveReport {
        propagated,
        rounds,
        pruned,
    }
}

/// Copies constructors and destructors from each base onto discovered
/// subclasses until a full round adds nothing.
///
/// Members are renamed for the subclass and skipped when the subclass
/// already has one with the same qualified name, so the pass is idempotent
/// and converges for chains of any depth in any order.
pub fn propagate_inherited(registry: &mut Registry) -> (usize, usize) {
    let names = registry.names_in_module(MAIN_MODULE);
    let mut propagated = 0;
    let mut rounds = 0;

    loop {
        rounds += 1;
        let mut changed = false;

        for name in &names {
            let inherited: Vec<MemberRecord> = match inherited_members(registry, name) {
                Some(members) => members,
                None => continue,
            };

            let Some(class) = registry.get_mut(name) else {
                continue;
            };
            for member in inherited {
                if class.has_member(&member.fullname) {
                    continue;
                }
                tracing::event!(
                    tracing::Level::DEBUG,
                    "{} inherits {}",
                    name,
                    member.fullname
                );
                class.members.push(member);
                propagated += 1;
                changed = true;
            }
        }

        if !changed {
            return (propagated, rounds);
        }
    }
}

fn inherited_members(registry: &Registry, name: &str) -> Option<Vec<MemberRecord>> {
    let base = registry.get(name)?.base.as_deref()?;
    let base_class = registry.get(base)?;
    Some(
        base_class
            .members
            .iter()
            .filter(|m| m.category.is_inherited())
            .map(|m| m.renamed_for(name))
            .collect(),
    )
}

/// Removes discovered classes that are not `QObject` subclasses.
pub fn prune_non_objects(registry: &mut Registry) -> Vec<String> {
    let doomed: Vec<String> = registry
        .classes_in_module(MAIN_MODULE)
        .filter(|c| !registry.is_object_subclass(&c.name))
        .map(|c| c.name.clone())
        .collect();

    for name in &doomed {
        tracing::event!(
            tracing::Level::DEBUG,
            "Pruning {}: not a QObject subclass",
            name
        );
        registry.remove(name);
    }

    doomed
}
